//! HTTP boundary error type.
//!
//! Domain errors convert into [`ApiError`], which renders the standard
//! [`ApiResponse`] envelope with a matching HTTP status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::types::{ApiResponse, error_codes};

/// Handler result: status + success envelope, or an [`ApiError`].
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// 200 OK with `data`
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 201 Created with `data`
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400: malformed or invalid input
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, message)
    }

    /// 400: stock cannot cover the requested quantity
    pub fn insufficient_stock(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_STOCK, message)
    }

    /// 400: operation not allowed in the current status
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_STATE, message)
    }

    /// 400: unique value already taken
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::DUPLICATE_ENTRY, message)
    }

    pub fn missing_auth(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::MISSING_AUTH, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            message,
        )
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            message,
        )
    }

    /// Log the underlying failure and return a generic 500.
    pub fn db_error(err: impl std::fmt::Display) -> Self {
        tracing::error!("Database error: {}", err);
        Self::internal("Internal server error")
    }

    pub fn into_err<T>(self) -> Result<T, ApiError> {
        Err(self)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::db_error(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()>::error(self.code, self.message));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_map_status_and_code() {
        let cases = [
            (ApiError::bad_request("x"), StatusCode::BAD_REQUEST, 1001),
            (ApiError::insufficient_stock("x"), StatusCode::BAD_REQUEST, 1002),
            (ApiError::invalid_state("x"), StatusCode::BAD_REQUEST, 1003),
            (ApiError::duplicate("x"), StatusCode::BAD_REQUEST, 1004),
            (ApiError::missing_auth("x"), StatusCode::UNAUTHORIZED, 2001),
            (ApiError::unauthorized("x"), StatusCode::UNAUTHORIZED, 2002),
            (ApiError::forbidden("x"), StatusCode::FORBIDDEN, 2003),
            (ApiError::not_found("x"), StatusCode::NOT_FOUND, 4004),
            (ApiError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR, 5000),
            (
                ApiError::service_unavailable("x"),
                StatusCode::SERVICE_UNAVAILABLE,
                5001,
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status, status);
            assert_eq!(err.code, code);
        }
    }

    #[test]
    fn test_sqlx_error_hides_details() {
        let err = ApiError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::not_found("Order not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_ok_and_created_helpers() {
        let (status, Json(body)) = ok(7).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.data, Some(7));

        let (status, _) = created("x").unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }
}
