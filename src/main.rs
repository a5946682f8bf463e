use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use bookmarks_api::bootstrap::app_context::{AppContext, AppServices};
use bookmarks_api::bootstrap::config::Config;
use bookmarks_api::infrastructure::db::repositories::bookmark_repository_sqlx::SqlxBookmarkRepository;
use bookmarks_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            bookmarks_api::presentation::http::auth::register,
            bookmarks_api::presentation::http::auth::login,
            bookmarks_api::presentation::http::auth::logout,
            bookmarks_api::presentation::http::auth::me,
            bookmarks_api::presentation::http::bookmarks::list_bookmarks,
            bookmarks_api::presentation::http::bookmarks::create_bookmark,
            bookmarks_api::presentation::http::bookmarks::get_bookmark,
            bookmarks_api::presentation::http::bookmarks::update_bookmark,
            bookmarks_api::presentation::http::bookmarks::delete_bookmark,
            bookmarks_api::presentation::http::health::health,
        ),
        components(schemas(
            bookmarks_api::presentation::http::auth::RegisterRequest,
            bookmarks_api::presentation::http::auth::LoginRequest,
            bookmarks_api::presentation::http::auth::LoginData,
            bookmarks_api::presentation::http::auth::LoginResponse,
            bookmarks_api::presentation::http::auth::UserResponse,
            bookmarks_api::presentation::http::auth::UserEnvelope,
            bookmarks_api::presentation::http::bookmarks::Bookmark,
            bookmarks_api::presentation::http::bookmarks::BookmarkResponse,
            bookmarks_api::presentation::http::bookmarks::BookmarkListResponse,
            bookmarks_api::presentation::http::bookmarks::CreateBookmarkRequest,
            bookmarks_api::presentation::http::bookmarks::UpdateBookmarkRequest,
            bookmarks_api::presentation::http::error::MessageResponse,
            bookmarks_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "User", description = "Registration and sessions"),
            (name = "Bookmarks", description = "Bookmark management"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PATCH,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // No cross-origin access in production without a parseable FRONTEND_URL.
        _ if cfg.is_production => base,
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "ctrl_c_listener_failed");
        return;
    }
    info!("ctrl+c received, shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "bookmarks_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        frontend_url = ?cfg.frontend_url,
        is_production = cfg.is_production,
        "Starting bookmarks API"
    );

    // Database
    let pool = bookmarks_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    bookmarks_api::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxBookmarkRepository::new(pool.clone())),
        Arc::new(SqlxUserRepository::new(pool.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .merge(bookmarks_api::presentation::http::router(ctx))
        .nest(
            "/api",
            bookmarks_api::presentation::http::health::routes(pool.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(build_cors(&cfg))
        .layer(DefaultBodyLimit::max(cfg.body_max_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("bookmarks API stopped");
    Ok(())
}
