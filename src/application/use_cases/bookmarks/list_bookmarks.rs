use uuid::Uuid;

use super::BookmarkError;
use crate::application::dto::bookmarks::{ListBookmarksOutput, ListBookmarksParams, total_pages};
use crate::application::ports::bookmark_repository::BookmarkRepository;

pub struct ListBookmarks<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> ListBookmarks<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        params: ListBookmarksParams,
    ) -> Result<ListBookmarksOutput, BookmarkError> {
        let (query, page) = params.into_query(user_id);
        let result = self
            .repo
            .list(&query)
            .await
            .map_err(BookmarkError::Repository)?;
        Ok(ListBookmarksOutput {
            page,
            limit: query.limit,
            total: result.total,
            total_pages: total_pages(result.total, query.limit),
            items: result.items,
        })
    }
}
