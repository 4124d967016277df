use super::models::ParseStatusError;
use super::plan::PlanError;
use crate::gateway::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),
    #[error("Order not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Plan(e @ PlanError::InsufficientStock { .. }) => {
                ApiError::insufficient_stock(e.to_string())
            }
            OrderError::Plan(e) => ApiError::bad_request(e.to_string()),
            OrderError::InvalidStatus(e) => ApiError::bad_request(e.to_string()),
            OrderError::NotFound => ApiError::not_found(err.to_string()),
            OrderError::Database(e) => ApiError::db_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_missing_product_is_client_error() {
        let err: ApiError = OrderError::Plan(PlanError::ProductNotFound(5)).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Product with ID 5 not found");
    }

    #[test]
    fn test_stock_and_not_found_mapping() {
        let err: ApiError = OrderError::Plan(PlanError::InsufficientStock {
            product_id: 1,
            available: 0,
            requested: 1,
        })
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, crate::gateway::types::error_codes::INSUFFICIENT_STOCK);

        let err: ApiError = OrderError::NotFound.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
