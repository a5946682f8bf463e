use uuid::Uuid;

use super::AuthError;
use crate::application::ports::user_repository::{User, UserRepository};

pub struct GetMe<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetMe<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        self.repo.find_by_id(id).await.map_err(AuthError::Repository)
    }
}
