use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{User, UserCredentials, UserRepository};
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> User {
    User {
        id: r.get("id"),
        email: r.get("email"),
        name: r.get("name"),
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        // The unique index decides between concurrent registrations of one email.
        let row = sqlx::query(
            r#"INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3)
               ON CONFLICT (email) DO NOTHING
               RETURNING id, email, name"#,
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let row = sqlx::query(
            r#"SELECT id, email, name, password_hash FROM users WHERE lower(email) = lower($1)"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(|r| UserCredentials {
            user: map_user(r),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(r#"SELECT id, email, name FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }
}
