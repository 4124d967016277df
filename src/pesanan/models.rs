use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::catalog::CatalogItem;
use crate::order::OrderStatus;

/// Single-toy order row
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PesananView {
    pub id: i64,
    pub user_id: i64,
    pub mainan_id: i64,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    /// Ordered toy, present in listings
    #[serde(rename = "Mainan", skip_serializing_if = "Option::is_none")]
    pub mainan: Option<CatalogItem>,
}

/// POST /pesanan body
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePesananRequest {
    pub mainan_id: i64,
    pub quantity: i32,
}

/// POST /mainan/order body
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct ToyOrderRequest {
    /// Toy id
    pub id: i64,
    pub quantity: i32,
}

/// POST /pesanan/pay body
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    pub pesanan_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayResponse {
    pub message: String,
    pub pesanan: PesananView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToyOrderResponse {
    pub message: String,
    pub mainan: CatalogItem,
    pub pesanan: PesananView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_field_names() {
        let req: CreatePesananRequest =
            serde_json::from_value(serde_json::json!({"mainanId": 3, "quantity": 2})).unwrap();
        assert_eq!((req.mainan_id, req.quantity), (3, 2));

        let pay: PayRequest =
            serde_json::from_value(serde_json::json!({"pesananId": 9})).unwrap();
        assert_eq!(pay.pesanan_id, 9);

        let toy: ToyOrderRequest =
            serde_json::from_value(serde_json::json!({"id": 4, "quantity": 1})).unwrap();
        assert_eq!(toy.id, 4);
    }

    #[test]
    fn test_listing_carries_mainan_key() {
        let view = PesananView {
            id: 1,
            user_id: 2,
            mainan_id: 3,
            quantity: 1,
            total_price: Decimal::new(5000, 0),
            status: OrderStatus::Pending,
            order_date: Utc::now(),
            mainan: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("Mainan").is_none());
        assert_eq!(json["status"], "pending");
        assert_eq!(json["mainanId"], 3);
    }
}
