use async_trait::async_trait;
use uuid::Uuid;

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Account plus its stored hash, only handed out for password checks.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `Ok(None)` when the email is already registered.
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>>;
    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
}
