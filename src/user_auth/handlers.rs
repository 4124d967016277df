use axum::{Extension, extract::State};
use std::sync::Arc;

use super::middleware::AuthenticatedUser;
use super::service::{AuthResponse, AuthServiceError, LoginRequest, RegisterRequest};
use crate::gateway::error::{ApiResult, created, ok};
use crate::gateway::extract::ValidatedJson;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, MessageData};

/// Register a new user
///
/// POST /api/v1/auth/register
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<i64>),
        (status = 400, description = "Invalid input, NIM or email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<i64> {
    match state.user_auth.register(&req).await {
        Ok(user_id) => {
            tracing::info!(user_id, "User registered");
            created(user_id)
        }
        Err(e @ (AuthServiceError::NimTaken | AuthServiceError::EmailTaken)) => {
            tracing::warn!("Registration rejected: {}", e);
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Login user
///
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Neither email nor NIM given"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    match state.user_auth.login(&req).await {
        Ok(resp) => {
            tracing::info!(user_id = resp.user.id, "Login successful");
            ok(resp)
        }
        Err(e) => {
            if matches!(e, AuthServiceError::InvalidCredentials) {
                tracing::warn!("Login failed: invalid credentials");
            }
            Err(e.into())
        }
    }
}

/// Logout (tokens are stateless; the client discards its token)
///
/// POST /api/v1/auth/logout
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<MessageData>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(Extension(user): Extension<AuthenticatedUser>) -> ApiResult<MessageData> {
    tracing::info!(user_id = user.user_id, "Logout");
    ok(MessageData::new("Logout successful"))
}
