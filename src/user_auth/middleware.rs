use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::gateway::{error::ApiError, state::AppState};
use crate::users::{Role, UserRepository};

/// Identity resolved from a verified token and the users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(value: Option<&str>) -> Result<&str, ApiError> {
    let auth_header =
        value.ok_or_else(|| ApiError::missing_auth("Missing Authorization header"))?;
    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(ApiError::unauthorized("Invalid token format")),
    }
}

pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract Authorization header
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let token = bearer_token(header_value)?;

    // 2. Verify signature and expiry
    let claims = state
        .user_auth
        .verify_token(token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
    let user_id = claims
        .user_id()
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    // 3. The account must still exist; its stored role wins over the claim
    let (user_id, role) = UserRepository::get_identity(state.db.pool(), user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id, role });
    Ok(next.run(request).await)
}

/// Layer after [`jwt_auth_middleware`].
pub async fn require_admin(request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .copied()
        .ok_or_else(|| ApiError::missing_auth("Authentication required"))?;

    if !user.is_admin() {
        tracing::warn!(user_id = user.user_id, "Admin route denied");
        return Err(ApiError::forbidden("Admin access required"));
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Router,
        http::StatusCode,
        middleware::from_fn,
        routing::get,
    };
    use tower::ServiceExt;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert_eq!(
            bearer_token(None).unwrap_err().status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(bearer_token(None).unwrap_err().code, 2001);
        assert_eq!(bearer_token(Some("Basic abc")).unwrap_err().code, 2002);
        assert!(bearer_token(Some("Bearer ")).is_err());
    }

    fn admin_router(user: Option<AuthenticatedUser>) -> Router {
        let router = Router::new()
            .route("/admin", get(|| async { "ok" }))
            .layer(from_fn(require_admin));
        match user {
            Some(user) => router.layer(Extension(user)),
            None => router,
        }
    }

    async fn status_for(user: Option<AuthenticatedUser>) -> StatusCode {
        admin_router(user)
            .oneshot(Request::builder().uri("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_require_admin() {
        assert_eq!(status_for(None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(Some(AuthenticatedUser {
                user_id: 1,
                role: Role::User
            }))
            .await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(Some(AuthenticatedUser {
                user_id: 2,
                role: Role::Admin
            }))
            .await,
            StatusCode::OK
        );
    }
}
