use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use super::AuthError;
use crate::application::ports::user_repository::{User, UserRepository};

pub const MISSING_CREDENTIALS: &str = "Please provide email and password";

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<User, AuthError> {
        let email = req.email.trim().to_lowercase();
        if email.is_empty() || req.password.is_empty() {
            return Err(AuthError::Validation(MISSING_CREDENTIALS));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| AuthError::Repository(anyhow::anyhow!(e.to_string())))?
            .to_string();
        self.repo
            .create_user(&email, req.name.trim(), &hash)
            .await
            .map_err(AuthError::Repository)?
            .ok_or(AuthError::EmailTaken)
    }
}
