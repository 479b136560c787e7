//! Authentication API endpoints
//!
//! Handles HTTP requests for authentication:
//! - POST /api/auth/login - Login with email and password
//! - POST /api/auth/refresh - Exchange a refresh token for a new pair
//! - GET /api/auth/me - Echo the authenticated claims
//! - POST /api/auth/register - Registration, wired only when enabled

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::services::auth::{AuthResponse, AuthServiceError};
use crate::services::token::Claims;

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response for the claims echo endpoint
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_info: Claims,
}

/// Build the public auth routes.
///
/// The register route only exists when registration is enabled in the
/// configuration; otherwise requests to it fall through to the 404
/// handler.
pub fn public_router(enable_registration: bool) -> Router<AppState> {
    let mut router = Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh_token));

    if enable_registration {
        router = router.route("/register", post(register));
    }

    router
}

/// Build the protected auth routes (requires auth middleware)
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

/// POST /api/auth/login - Login with email and password
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = state
        .auth_service
        .login(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            AuthServiceError::AuthenticationError(msg) => {
                tracing::warn!("Login rejected for {}", body.email);
                ApiError::unauthorized(msg)
            }
            _ => ApiError::internal_error(e.to_string()),
        })?;

    Ok(Json(response))
}

/// POST /api/auth/refresh - Exchange a refresh token for a fresh pair
async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = state
        .auth_service
        .refresh_token(&body.refresh_token)
        .await
        .map_err(|e| match e {
            AuthServiceError::AuthenticationError(msg) => {
                tracing::warn!("Refresh rejected: {}", msg);
                ApiError::unauthorized(msg)
            }
            _ => ApiError::internal_error(e.to_string()),
        })?;

    Ok(Json(response))
}

/// GET /api/auth/me - Echo the decoded claims of the presented token
async fn me(user: AuthenticatedUser) -> Json<MeResponse> {
    Json(MeResponse { user_info: user.0 })
}

/// POST /api/auth/register - Register a new account and sign it in
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response = state
        .auth_service
        .register(&body.username, &body.email, &body.password)
        .await
        .map_err(|e| match e {
            AuthServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            AuthServiceError::UserExists(msg) => ApiError::conflict(msg),
            _ => ApiError::internal_error(e.to_string()),
        })?;

    Ok((StatusCode::CREATED, Json(response)))
}
