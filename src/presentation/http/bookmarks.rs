use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::bookmarks::ListBookmarksParams;
use crate::application::use_cases::bookmarks::BookmarkError;
use crate::application::use_cases::bookmarks::create_bookmark::{
    CreateBookmark, CreateBookmarkInput,
};
use crate::application::use_cases::bookmarks::delete_bookmark::DeleteBookmark;
use crate::application::use_cases::bookmarks::get_bookmark::GetBookmark;
use crate::application::use_cases::bookmarks::list_bookmarks::ListBookmarks;
use crate::application::use_cases::bookmarks::update_bookmark::{
    UpdateBookmark, UpdateBookmarkInput,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::bookmarks::bookmark as domain;
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::{ApiError, MessageResponse};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub user: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Bookmark> for Bookmark {
    fn from(b: domain::Bookmark) -> Self {
        Bookmark {
            id: b.id,
            title: b.title,
            url: b.url,
            tags: b.tags,
            is_favorite: b.is_favorite,
            user: b.owner_id,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookmarkResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Bookmark,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkListResponse {
    pub success: bool,
    pub page: i64,
    pub limit: i64,
    pub total_results: i64,
    pub total_pages: i64,
    pub data: Vec<Bookmark>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmarkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookmarkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

// Kept as raw strings: parsing and clamping happen in the use case.
#[derive(Debug, Deserialize)]
pub struct ListBookmarksQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub tag: Option<String>,
    pub favorite: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl From<ListBookmarksQuery> for ListBookmarksParams {
    fn from(q: ListBookmarksQuery) -> Self {
        ListBookmarksParams {
            page: q.page,
            limit: q.limit,
            tag: q.tag,
            favorite: q.favorite,
            search: q.search,
            sort: q.sort,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to add bookmark",
            Operation::List => "Failed to fetch bookmarks",
            Operation::Get => "Failed to fetch bookmark",
            Operation::Update => "Unable to update the bookmark",
            Operation::Delete => "Failed to delete bookmark",
        }
    }

    fn forbidden_message(self) -> &'static str {
        match self {
            Operation::Delete => "Not authorized to delete the bookmark",
            _ => "Not authorized to update the bookmark",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Operation::Get => "Bookmark not found or not authorized",
            _ => "Bookmark not found",
        }
    }
}

fn bookmark_error(op: Operation, err: BookmarkError) -> ApiError {
    match err {
        BookmarkError::Validation(msg) => ApiError::bad_request(msg),
        BookmarkError::NotFound => ApiError::not_found(op.not_found_message()),
        BookmarkError::Forbidden => ApiError::forbidden(op.forbidden_message()),
        BookmarkError::Repository(e) => {
            tracing::error!(operation = op.name(), error = ?e, "bookmark_operation_failed");
            ApiError::internal(op.failure_message())
        }
    }
}

fn bookmark_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request("Invalid bookmark ID"))
}

#[utoipa::path(post, path = "/api/v1/bookMarks", tag = "Bookmarks", request_body = CreateBookmarkRequest, responses(
    (status = 201, body = BookmarkResponse),
    (status = 400, body = MessageResponse),
    (status = 401, body = MessageResponse)
))]
pub async fn create_bookmark(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    body: Result<Json<CreateBookmarkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookmarkResponse>), ApiError> {
    let Json(req) = body?;
    let repo = ctx.bookmark_repo();
    let uc = CreateBookmark {
        repo: repo.as_ref(),
    };
    let input = CreateBookmarkInput {
        title: req.title,
        url: req.url,
        tags: req.tags,
        is_favorite: req.is_favorite,
    };
    let created = uc
        .execute(user_id, input)
        .await
        .map_err(|e| bookmark_error(Operation::Create, e))?;
    tracing::info!(bookmark_id = %created.id, user_id = %user_id, "bookmark_created");
    Ok((
        StatusCode::CREATED,
        Json(BookmarkResponse {
            success: true,
            message: Some("Bookmark added successfully".into()),
            data: created.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/v1/bookMarks", tag = "Bookmarks",
    params(
        ("page" = Option<i64>, Query, description = "1-based page, defaults to 1"),
        ("limit" = Option<i64>, Query, description = "Page size, defaults to 10, at most 50"),
        ("tag" = Option<String>, Query, description = "Only bookmarks carrying this tag"),
        ("favorite" = Option<bool>, Query, description = "Filter on the favorite flag"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on title, url or tags"),
        ("sort" = Option<String>, Query, description = "createdAt | updatedAt | title | url | isFavorite (descending)")
    ),
    responses(
        (status = 200, body = BookmarkListResponse),
        (status = 400, body = MessageResponse),
        (status = 401, body = MessageResponse)
    ))]
pub async fn list_bookmarks(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    q: Result<Query<ListBookmarksQuery>, QueryRejection>,
) -> Result<Json<BookmarkListResponse>, ApiError> {
    let Query(params) = q?;
    let repo = ctx.bookmark_repo();
    let uc = ListBookmarks {
        repo: repo.as_ref(),
    };
    let out = uc
        .execute(user_id, params.into())
        .await
        .map_err(|e| bookmark_error(Operation::List, e))?;
    Ok(Json(BookmarkListResponse {
        success: true,
        page: out.page,
        limit: out.limit,
        total_results: out.total,
        total_pages: out.total_pages,
        data: out.items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/v1/bookMarks/{id}", tag = "Bookmarks",
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    responses(
        (status = 200, body = BookmarkResponse),
        (status = 400, body = MessageResponse),
        (status = 404, body = MessageResponse)
    ))]
pub async fn get_bookmark(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let id = bookmark_id(id)?;
    let repo = ctx.bookmark_repo();
    let uc = GetBookmark {
        repo: repo.as_ref(),
    };
    let bookmark = uc
        .execute(user_id, id)
        .await
        .map_err(|e| bookmark_error(Operation::Get, e))?;
    Ok(Json(BookmarkResponse {
        success: true,
        message: None,
        data: bookmark.into(),
    }))
}

#[utoipa::path(patch, path = "/api/v1/bookMarks/{id}", tag = "Bookmarks", request_body = UpdateBookmarkRequest,
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    responses(
        (status = 200, body = BookmarkResponse),
        (status = 400, body = MessageResponse),
        (status = 403, body = MessageResponse),
        (status = 404, body = MessageResponse)
    ))]
pub async fn update_bookmark(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateBookmarkRequest>, JsonRejection>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let id = bookmark_id(id)?;
    let Json(req) = body?;
    let repo = ctx.bookmark_repo();
    let uc = UpdateBookmark {
        repo: repo.as_ref(),
    };
    let input = UpdateBookmarkInput {
        title: req.title,
        url: req.url,
        tags: req.tags,
        is_favorite: req.is_favorite,
    };
    let updated = uc
        .execute(id, user_id, input)
        .await
        .map_err(|e| bookmark_error(Operation::Update, e))?;
    tracing::info!(bookmark_id = %id, user_id = %user_id, "bookmark_updated");
    Ok(Json(BookmarkResponse {
        success: true,
        message: Some("Bookmark updated".into()),
        data: updated.into(),
    }))
}

#[utoipa::path(delete, path = "/api/v1/bookMarks/{id}", tag = "Bookmarks",
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 403, body = MessageResponse),
        (status = 404, body = MessageResponse)
    ))]
pub async fn delete_bookmark(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = bookmark_id(id)?;
    let repo = ctx.bookmark_repo();
    let uc = DeleteBookmark {
        repo: repo.as_ref(),
    };
    uc.execute(id, user_id)
        .await
        .map_err(|e| bookmark_error(Operation::Delete, e))?;
    tracing::info!(bookmark_id = %id, user_id = %user_id, "bookmark_deleted");
    Ok(Json(MessageResponse {
        success: true,
        message: "Bookmark deleted".into(),
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/bookMarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookMarks/:id",
            get(get_bookmark)
                .patch(update_bookmark)
                .delete(delete_bookmark),
        )
        .with_state(ctx)
}
