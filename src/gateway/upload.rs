//! Multipart image uploads and raw image responses.

use axum::{
    body::Body,
    extract::Multipart,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::error::ApiError;
use crate::db::StoredImage;

pub const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Image bytes read from a multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Read the first file in `field_name`; other fields are skipped.
pub async fn read_image_field(
    mut multipart: Multipart,
    field_name: &str,
    max_bytes: usize,
) -> Result<UploadedImage, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e.body_text())))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or_default()
            .to_ascii_lowercase();
        check_image_type(&content_type)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e.body_text())))?;
        check_image_size(bytes.len(), max_bytes)?;

        return Ok(UploadedImage {
            bytes: bytes.to_vec(),
            content_type,
        });
    }

    Err(ApiError::bad_request("No file uploaded"))
}

pub fn check_image_type(content_type: &str) -> Result<(), ApiError> {
    if content_type.starts_with("image/") {
        Ok(())
    } else {
        Err(ApiError::bad_request("File must be an image"))
    }
}

pub fn check_image_size(len: usize, max_bytes: usize) -> Result<(), ApiError> {
    if len == 0 {
        return Err(ApiError::bad_request("No file uploaded"));
    }
    if len > max_bytes {
        return Err(ApiError::bad_request(format!(
            "File too large (max {} bytes)",
            max_bytes
        )));
    }
    Ok(())
}

/// Raw image bytes with their stored content type.
pub struct ImageBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl From<StoredImage> for ImageBody {
    fn from(image: StoredImage) -> Self {
        Self {
            bytes: image.bytes,
            content_type: image.content_type,
        }
    }
}

impl IntoResponse for ImageBody {
    fn into_response(self) -> Response {
        let content_type = self
            .content_type
            .unwrap_or_else(|| DEFAULT_IMAGE_TYPE.to_string());
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type)],
            Body::from(self.bytes),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_images_accepted() {
        assert!(check_image_type("image/png").is_ok());
        assert!(check_image_type("image/jpeg").is_ok());
        assert!(check_image_type("application/pdf").is_err());
        assert!(check_image_type("").is_err());
    }

    #[test]
    fn test_size_limits() {
        assert!(check_image_size(1, 10).is_ok());
        assert!(check_image_size(10, 10).is_ok());
        assert!(check_image_size(11, 10).is_err());
        assert!(check_image_size(0, 10).is_err());
    }

    #[test]
    fn test_image_body_defaults_to_jpeg() {
        let response = ImageBody {
            bytes: vec![1, 2, 3],
            content_type: None,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            DEFAULT_IMAGE_TYPE
        );
    }
}
