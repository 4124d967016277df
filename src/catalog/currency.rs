//! Static-rate conversion of rupiah prices.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use super::models::CatalogItem;

/// Rupiah per unit of foreign currency
pub const IDR_PER_USD: Decimal = Decimal::from_parts(15500, 0, 0, false, 0);
pub const IDR_PER_EUR: Decimal = Decimal::from_parts(17000, 0, 0, false, 0);
pub const IDR_PER_JPY: Decimal = Decimal::from_parts(110, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceConversion {
    pub id: i64,
    pub name: String,
    pub stock: i32,
    #[schema(value_type = String)]
    pub price_rupiah: Decimal,
    #[schema(value_type = String)]
    pub price_usd: Decimal,
    #[schema(value_type = String)]
    pub price_eur: Decimal,
    #[schema(value_type = String)]
    pub price_jpy: Decimal,
}

impl PriceConversion {
    pub fn from_item(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            stock: item.stock,
            price_rupiah: item.price,
            price_usd: convert(item.price, IDR_PER_USD, 2),
            price_eur: convert(item.price, IDR_PER_EUR, 2),
            price_jpy: convert(item.price, IDR_PER_JPY, 0),
        }
    }
}

/// `rupiah / rate`, rounded half away from zero to `dp` places.
pub fn convert(rupiah: Decimal, rate: Decimal, dp: u32) -> Decimal {
    if rate.is_zero() {
        return Decimal::ZERO;
    }
    (rupiah / rate).round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
