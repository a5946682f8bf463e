use std::time::Duration;

use sqlx::{Pool, Postgres};

pub type PgPool = Pool<Postgres>;

const MAX_CONNECTIONS: u32 = 10;

pub async fn connect_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    tracing::debug!(max_connections = MAX_CONNECTIONS, "db_pool_ready");
    Ok(pool)
}

/// Applies the migrations embedded from `./migrations` at compile time.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("db_migrations_applied");
    Ok(())
}

pub mod repositories;
