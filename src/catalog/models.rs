//! Catalog rows and request bodies

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Product or toy as returned by the API (binary image omitted)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "150000.00")]
    pub price: Decimal,
    pub stock: i32,
    /// Externally hosted image
    pub image_url: Option<String>,
    /// Endpoint serving the stored image, null when none is stored
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogItem {
    #[validate(length(min = 1, max = 255, message = "must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "150000.00")]
    #[validate(custom(function = "valid_price"))]
    pub price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub stock: i32,
    #[validate(length(max = 512))]
    pub image_url: Option<String>,
}

/// PUT body; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPatch {
    #[validate(length(min = 1, max = 255, message = "must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "valid_price"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub stock: Option<i32>,
    #[validate(length(max = 512))]
    pub image_url: Option<String>,
}

/// Upper bound (exclusive) of a `NUMERIC(10, 2)` price column
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

fn valid_price(price: &Decimal) -> Result<(), ValidationError> {
    let message = if price.is_sign_negative() && !price.is_zero() {
        "must not be negative"
    } else if *price >= MAX_PRICE {
        "must be below 100000000"
    } else if price.normalize().scale() > 2 {
        "must have at most 2 decimal places"
    } else {
        return Ok(());
    };
    let mut err = ValidationError::new("range");
    err.message = Some(message.into());
    Err(err)
}
