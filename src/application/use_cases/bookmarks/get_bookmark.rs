use uuid::Uuid;

use super::BookmarkError;
use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::Bookmark;

pub struct GetBookmark<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> GetBookmark<'a, R> {
    // Someone else's bookmark reads as missing so its id is not disclosed.
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> Result<Bookmark, BookmarkError> {
        self.repo
            .find_owned(id, user_id)
            .await
            .map_err(BookmarkError::Repository)?
            .ok_or(BookmarkError::NotFound)
    }
}
