use axum::{
    Json, Router,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::access::{self, Capability};
use crate::application::dto::users::{
    AuthenticateRequest, AuthenticateResponse, RegisterRequest, UserDto,
};
use crate::application::error::ServiceError;
use crate::application::use_cases::auth::login::Login;
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::Register;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::user::{Role, User};
use crate::presentation::http::error::{ApiError, ErrorResponse};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/authenticate", post(authenticate))
        .route("/me", get(me))
        .with_state(ctx)
}

pub fn issue_token(cfg: &Config, user: &User) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        iat: now,
        exp: now + cfg.jwt_expires_secs.max(0) as usize,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn validate_token(cfg: &Config, token: &str) -> Option<Claims> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| tracing::debug!(error = %e, "token_rejected"))
    .ok()
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = AuthenticateResponse),
    (status = 400, body = ErrorResponse),
    (status = 409, body = ErrorResponse)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthenticateResponse>), ApiError> {
    let Json(req) = payload?;
    let repo = ctx.user_repo();
    let user = Register {
        repo: repo.as_ref(),
    }
    .execute(&req)
    .await?;
    let token = issue_token(&ctx.cfg, &user)?;
    Ok((StatusCode::CREATED, Json(AuthenticateResponse { token })))
}

#[utoipa::path(post, path = "/api/auth/authenticate", tag = "Auth", request_body = AuthenticateRequest, security(()), responses(
    (status = 200, body = AuthenticateResponse),
    (status = 401, body = ErrorResponse)
))]
pub async fn authenticate(
    State(ctx): State<AppContext>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> Result<Json<AuthenticateResponse>, ApiError> {
    let Json(req) = payload?;
    let repo = ctx.user_repo();
    let user = Login {
        repo: repo.as_ref(),
    }
    .execute(&req)
    .await?;
    let token = issue_token(&ctx.cfg, &user)?;
    tracing::info!(user_id = user.id, "user_authenticated");
    Ok(Json(AuthenticateResponse { token }))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses(
    (status = 200, body = UserDto),
    (status = 401, body = ErrorResponse)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserDto>, ApiError> {
    let repo = ctx.user_repo();
    let dto = GetMe {
        repo: repo.as_ref(),
    }
    .execute(user.id)
    .await?;
    Ok(Json(dto))
}

// --- Bearer & current-user extractors ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
            .map(|t| Bearer(t.trim().to_string()))
            .ok_or(ApiError(ServiceError::Unauthorized))
    }
}

/// The account behind a valid bearer token, freshly loaded.
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn require(&self, needed: Capability) -> Result<&User, ApiError> {
        access::require(&self.0, needed)?;
        Ok(&self.0)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let Bearer(token) = Bearer::from_request_parts(parts, ctx).await?;
        let claims =
            validate_token(&ctx.cfg, &token).ok_or(ApiError(ServiceError::Unauthorized))?;
        let id: i64 = claims
            .sub
            .parse()
            .map_err(|_| ApiError(ServiceError::Unauthorized))?;
        let user = ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or(ApiError(ServiceError::Unauthorized))?;
        Ok(CurrentUser(user))
    }
}
