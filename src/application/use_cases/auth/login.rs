use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use once_cell::sync::Lazy;
use password_hash::rand_core::OsRng;

use super::AuthError;
use crate::application::ports::user_repository::{User, UserRepository};

// Verified against when the email is unknown so both outcomes cost one argon2 run.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"unknown-account", &salt)
        .ok()
        .map(|h| h.to_string())
});

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn verify(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Repository(anyhow::anyhow!(e.to_string())))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// `Ok(None)` means the credentials did not match.
    pub async fn execute(&self, req: &LoginRequest) -> Result<Option<User>, AuthError> {
        let email = req.email.trim().to_lowercase();
        let Some(creds) = self
            .repo
            .find_credentials(&email)
            .await
            .map_err(AuthError::Repository)?
        else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify(&req.password, dummy);
            }
            return Ok(None);
        };
        if verify(&req.password, &creds.password_hash)? {
            Ok(Some(creds.user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};
    use crate::testing::InMemoryUserRepository;

    #[tokio::test]
    async fn verifies_password() {
        let repo = InMemoryUserRepository::default();
        Register { repo: &repo }
            .execute(&RegisterRequest {
                email: "ferris@example.com".into(),
                name: "Ferris".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();
        let uc = Login { repo: &repo };

        let ok = uc
            .execute(&LoginRequest {
                email: "FERRIS@example.com".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.unwrap().email, "ferris@example.com");

        let wrong = uc
            .execute(&LoginRequest {
                email: "ferris@example.com".into(),
                password: "battery staple".into(),
            })
            .await
            .unwrap();
        assert!(wrong.is_none());

        let unknown = uc
            .execute(&LoginRequest {
                email: "nobody@example.com".into(),
                password: "x".into(),
            })
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[test]
    fn unknown_accounts_still_run_a_real_verification() {
        let dummy = DUMMY_HASH.as_deref().expect("dummy hash is generated");
        assert!(dummy.starts_with("$argon2"));
        assert!(verify("unknown-account", dummy).unwrap());
        assert!(!verify("guess", dummy).unwrap());
    }
}
