use crate::gateway::error::ApiError;
use crate::order::PlanError;
use crate::order::models::StatusTransitionError;

#[derive(Debug, thiserror::Error)]
pub enum PesananError {
    #[error("Mainan not found")]
    ToyNotFound,
    #[error("Quantity must be positive")]
    InvalidQuantity,
    #[error("Not enough stock available")]
    InsufficientStock { available: i32, requested: i32 },
    #[error("Pesanan not found")]
    NotFound,
    #[error(transparent)]
    Transition(#[from] StatusTransitionError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<PlanError> for PesananError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::ProductNotFound(_) => PesananError::ToyNotFound,
            PlanError::InsufficientStock {
                available,
                requested,
                ..
            } => PesananError::InsufficientStock {
                available,
                requested,
            },
            PlanError::Empty
            | PlanError::InvalidQuantity { .. }
            | PlanError::QuantityOverflow { .. } => PesananError::InvalidQuantity,
        }
    }
}

impl From<PesananError> for ApiError {
    fn from(err: PesananError) -> Self {
        match err {
            PesananError::ToyNotFound | PesananError::NotFound => {
                ApiError::not_found(err.to_string())
            }
            PesananError::InvalidQuantity => ApiError::bad_request(err.to_string()),
            PesananError::InsufficientStock { .. } => ApiError::insufficient_stock(err.to_string()),
            PesananError::Transition(e) => ApiError::invalid_state(e.to_string()),
            PesananError::Database(e) => ApiError::db_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_missing_toy_is_not_found() {
        let err: ApiError = PesananError::from(PlanError::ProductNotFound(1)).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_already_paid_is_bad_request() {
        let err: ApiError = PesananError::from(StatusTransitionError::AlreadyPaid).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Order already paid");
    }

    #[test]
    fn test_plan_errors_collapse() {
        assert!(matches!(
            PesananError::from(PlanError::InvalidQuantity {
                product_id: 1,
                quantity: 0
            }),
            PesananError::InvalidQuantity
        ));
        assert!(matches!(
            PesananError::from(PlanError::InsufficientStock {
                product_id: 1,
                available: 2,
                requested: 3
            }),
            PesananError::InsufficientStock {
                available: 2,
                requested: 3
            }
        ));
    }
}
