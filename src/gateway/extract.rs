//! Request extractors
//!
//! - [`ValidatedJson`]: JSON body + `validator::Validate`, with rejections
//!   rendered as the standard error envelope.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::ApiError;

/// JSON body that has passed `Validate::validate`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value): Json<T> = Json::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;

        value
            .validate()
            .map_err(|e| ApiError::bad_request(validation_message(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten field errors into `field: message` pairs, sorted by field name.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: invalid ({})", field, e.code),
            })
        })
        .collect();
    parts.sort();
    if parts.is_empty() {
        "Invalid request body".to_string()
    } else {
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 0))]
        stock: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let ValidatedJson(probe) =
            ValidatedJson::<Probe>::from_request(json_request(r#"{"name":"a","stock":1}"#), &())
                .await
                .unwrap();
        assert_eq!(probe.name, "a");
        assert_eq!(probe.stock, 1);
    }

    #[tokio::test]
    async fn test_validation_failure_lists_fields() {
        let err =
            ValidatedJson::<Probe>::from_request(json_request(r#"{"name":"","stock":-1}"#), &())
                .await
                .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("name: must not be empty"));
        assert!(err.message.contains("stock: invalid (range)"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let err = ValidatedJson::<Probe>::from_request(json_request("{nope"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.starts_with("Invalid JSON"));
    }
}
