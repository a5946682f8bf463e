use uuid::Uuid;

use super::BookmarkError;
use crate::application::access::{self, Capability};
use crate::application::ports::bookmark_repository::BookmarkRepository;

pub struct DeleteBookmark<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> DeleteBookmark<'a, R> {
    pub async fn execute(&self, id: Uuid, user_id: Uuid) -> Result<(), BookmarkError> {
        let current = self
            .repo
            .get_by_id(id)
            .await
            .map_err(BookmarkError::Repository)?
            .ok_or(BookmarkError::NotFound)?;
        if access::resolve_bookmark(user_id, &current) < Capability::Edit {
            return Err(BookmarkError::Forbidden);
        }
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(BookmarkError::Repository)?;
        if deleted {
            Ok(())
        } else {
            Err(BookmarkError::NotFound)
        }
    }
}
