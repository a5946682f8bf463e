pub mod auth;
pub mod bookmarks;
pub mod error;
pub mod health;

use axum::Router;

use crate::bootstrap::app_context::AppContext;

/// Versioned API surface. Health and docs are mounted by the binary.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api/v1", bookmarks::routes(ctx.clone()))
        .nest("/api/v1/user", auth::routes(ctx))
}
