use uuid::Uuid;

use super::BookmarkError;
use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::{
    Bookmark, NewBookmark, normalize_required, normalize_tags,
};

pub const MISSING_FIELDS: &str = "Please provide title and url";

#[derive(Debug, Clone, Default)]
pub struct CreateBookmarkInput {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

pub struct CreateBookmark<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> CreateBookmark<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateBookmarkInput,
    ) -> Result<Bookmark, BookmarkError> {
        let title = input.title.as_deref().and_then(normalize_required);
        let url = input.url.as_deref().and_then(normalize_required);
        let (Some(title), Some(url)) = (title, url) else {
            return Err(BookmarkError::Validation(MISSING_FIELDS));
        };
        let new = NewBookmark {
            owner_id: user_id,
            title,
            url,
            tags: normalize_tags(input.tags.unwrap_or_default()),
            is_favorite: input.is_favorite.unwrap_or(false),
        };
        self.repo
            .create(new)
            .await
            .map_err(BookmarkError::Repository)
    }
}
