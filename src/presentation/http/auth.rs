use crate::application::use_cases::auth::AuthError;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::{ApiError, MessageResponse};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

const ACCESS_COOKIE: &str = "access_token";

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub success: bool,
    pub data: UserResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub data: LoginData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

fn auth_error(err: AuthError) -> ApiError {
    match err {
        AuthError::Validation(msg) => ApiError::bad_request(msg),
        AuthError::EmailTaken => ApiError::conflict("User already exists"),
        AuthError::Repository(e) => {
            tracing::error!(error = ?e, "auth_repository_failed");
            ApiError::internal("Authentication service unavailable")
        }
    }
}

#[utoipa::path(post, path = "/api/v1/user/register", tag = "User", request_body = RegisterRequest, responses(
    (status = 201, body = UserEnvelope),
    (status = 400, body = MessageResponse),
    (status = 409, body = MessageResponse)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError> {
    let Json(req) = body?;
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        email: req.email,
        name: req.name,
        password: req.password,
    };
    let user = uc.execute(&dto).await.map_err(auth_error)?;
    tracing::info!(user_id = %user.id, "user_registered");
    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            success: true,
            data: UserResponse {
                id: user.id,
                email: user.email,
                name: user.name,
            },
        }),
    ))
}

#[utoipa::path(post, path = "/api/v1/user/login", tag = "User", request_body = LoginRequest, responses(
    (status = 200, body = LoginResponse),
    (status = 401, body = MessageResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let Json(req) = body?;
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await
        .map_err(auth_error)?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;
    let token = issue_token(&ctx.cfg, user.id).map_err(|e| {
        tracing::error!(error = ?e, "jwt_encode_failed");
        ApiError::internal("Unable to sign in")
    })?;

    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, ctx.cfg.jwt_expires_secs, ctx.cfg.secure_cookies());
    if let Ok(v) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, v);
    }

    Ok((
        headers,
        Json(LoginResponse {
            success: true,
            message: "Logged in successfully".into(),
            data: LoginData {
                access_token: token,
                user: UserResponse {
                    id: user.id,
                    email: user.email,
                    name: user.name,
                },
            },
        }),
    ))
}

#[utoipa::path(get, path = "/api/v1/user/me", tag = "User", responses(
    (status = 200, body = UserEnvelope),
    (status = 401, body = MessageResponse)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<UserEnvelope>, ApiError> {
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let row = uc
        .execute(user_id)
        .await
        .map_err(auth_error)?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;
    Ok(Json(UserEnvelope {
        success: true,
        data: UserResponse {
            id: row.id,
            email: row.email,
            name: row.name,
        },
    }))
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1) Prefer Authorization header if present
        if let Some(auth) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.trim().to_string()));
            }
        }

        // 2) Fallback to HttpOnly cookie
        if let Some(cookie_hdr) = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(token) = get_cookie(cookie_hdr, ACCESS_COOKIE) {
                return Ok(Bearer(token));
            }
        }

        Err(ApiError::unauthorized("Authentication required"))
    }
}

/// Authenticated caller, resolved from a valid bearer token.
pub struct CurrentUser(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let bearer = Bearer::from_request_parts(parts, ctx).await?;
        validate_bearer(&ctx.cfg, bearer).map(CurrentUser)
    }
}

pub fn issue_token(cfg: &Config, user_id: Uuid) -> jsonwebtoken::errors::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (cfg.jwt_expires_secs.max(0) as usize),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
}

pub(crate) fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<Uuid, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
    Uuid::parse_str(&data.claims.sub).map_err(|_| ApiError::unauthorized("Invalid or expired token"))
}

// --- Cookie helpers & logout ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{ACCESS_COOKIE}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

#[utoipa::path(post, path = "/api/v1/user/logout", tag = "User", responses((status = 204)))]
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, StatusCode) {
    // Clear cookie by setting it expired
    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie("", 0, ctx.cfg.secure_cookies());
    if let Ok(v) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, v);
    }
    (headers, StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_lookup_handles_spacing_and_missing() {
        let hdr = "theme=dark;  access_token=abc.def ; other=1";
        assert_eq!(get_cookie(hdr, "access_token").as_deref(), Some("abc.def"));
        assert_eq!(get_cookie(hdr, "missing"), None);
        assert_eq!(get_cookie("access_token=", "access_token"), None);
    }

    #[test]
    fn access_cookie_is_http_only_and_optionally_secure() {
        let c = build_access_cookie("tok", 60, false);
        assert_eq!(c, "access_token=tok; HttpOnly; Path=/; Max-Age=60; SameSite=Lax");
        assert!(build_access_cookie("tok", 60, true).contains("; Secure"));
        assert!(build_access_cookie("", -5, false).contains("Max-Age=0"));
    }

    #[test]
    fn issued_token_round_trips_to_user_id() {
        let cfg = Config::for_tests();
        let id = Uuid::new_v4();
        let token = issue_token(&cfg, id).unwrap();
        assert_eq!(validate_bearer(&cfg, Bearer(token)).unwrap(), id);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let cfg = Config::for_tests();
        let other = Config {
            jwt_secret: "another-secret-entirely".into(),
            ..Config::for_tests()
        };
        let token = issue_token(&other, Uuid::new_v4()).unwrap();
        let err = validate_bearer(&cfg, Bearer(token)).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let cfg = Config::for_tests();
        let claims = Claims {
            sub: "not-a-uuid".into(),
            exp: chrono::Utc::now().timestamp() as usize + 60,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();
        assert!(validate_bearer(&cfg, Bearer(token)).is_err());
    }
}
