//! Order validation and pricing.
//!
//! [`plan_order`] checks every requested line against a snapshot of the
//! product rows and derives the per-line price and the order total. It has
//! no side effects: the repository takes the snapshots under row locks,
//! plans, and only then writes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// One requested line: `{productId, quantity}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub product_id: i64,
    pub quantity: i32,
}

/// Product state read inside the order transaction
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub id: i64,
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedLine {
    pub product_id: i64,
    pub quantity: i32,
    /// Product price at planning time
    pub price: Decimal,
    pub remaining_stock: i32,
}

impl PlannedLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlan {
    /// Sorted by product id
    pub lines: Vec<PlannedLine>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("Order must contain at least one item")]
    Empty,
    #[error("Quantity for product ID {product_id} must be positive, got {quantity}")]
    InvalidQuantity { product_id: i64, quantity: i32 },
    #[error("Quantity for product ID {product_id} is too large")]
    QuantityOverflow { product_id: i64 },
    #[error("Product with ID {0} not found")]
    ProductNotFound(i64),
    #[error("Not enough stock for product ID {product_id}. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i32,
        requested: i32,
    },
}

/// Reject empty orders and non-positive quantities, then sum the
/// quantities of repeated product ids. Output is sorted by product id.
pub fn merge_lines(items: &[LineRequest]) -> Result<Vec<LineRequest>, PlanError> {
    if items.is_empty() {
        return Err(PlanError::Empty);
    }

    let mut merged: BTreeMap<i64, i32> = BTreeMap::new();
    for item in items {
        if item.quantity <= 0 {
            return Err(PlanError::InvalidQuantity {
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }
        let quantity = merged.entry(item.product_id).or_insert(0);
        *quantity = quantity
            .checked_add(item.quantity)
            .ok_or(PlanError::QuantityOverflow {
                product_id: item.product_id,
            })?;
    }

    Ok(merged
        .into_iter()
        .map(|(product_id, quantity)| LineRequest {
            product_id,
            quantity,
        })
        .collect())
}

/// Plan an order against product snapshots.
///
/// `lookup` returns `None` for a product id that does not exist. The first
/// failing line (in product id order) decides the error.
pub fn plan_order<'a, F>(items: &[LineRequest], lookup: F) -> Result<OrderPlan, PlanError>
where
    F: Fn(i64) -> Option<&'a ProductSnapshot>,
{
    let merged = merge_lines(items)?;

    let mut lines = Vec::with_capacity(merged.len());
    let mut total = Decimal::ZERO;
    for line in merged {
        let product = lookup(line.product_id).ok_or(PlanError::ProductNotFound(line.product_id))?;
        if product.stock < line.quantity {
            return Err(PlanError::InsufficientStock {
                product_id: line.product_id,
                available: product.stock,
                requested: line.quantity,
            });
        }

        let planned = PlannedLine {
            product_id: line.product_id,
            quantity: line.quantity,
            price: product.price,
            remaining_stock: product.stock - line.quantity,
        };
        total += planned.subtotal();
        lines.push(planned);
    }

    Ok(OrderPlan { lines, total })
}
