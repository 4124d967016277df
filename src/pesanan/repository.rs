use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use super::error::PesananError;
use super::models::PesananView;
use crate::catalog::repository::{ITEM_COLUMNS, map_item};
use crate::catalog::{CatalogItem, CatalogKind, CatalogRepository};
use crate::db::decode_error;
use crate::order::{LineRequest, OrderStatus, ProductSnapshot, plan_order};

const PESANAN_COLUMNS: &str = "id, user_id, mainan_id, quantity, total_price, status, order_date";

pub struct PesananRepository;

impl PesananRepository {
    /// Insert the order row and decrement the toy stock in one transaction.
    /// Returns the new row and the toy after the decrement.
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        mainan_id: i64,
        quantity: i32,
    ) -> Result<(PesananView, CatalogItem), PesananError> {
        let line = LineRequest {
            product_id: mainan_id,
            quantity,
        };
        if quantity <= 0 {
            return Err(PesananError::InvalidQuantity);
        }

        let mut tx = pool.begin().await?;

        let snapshot = sqlx::query("SELECT id, price, stock FROM mainan WHERE id = $1 FOR UPDATE")
            .bind(mainan_id)
            .fetch_optional(&mut *tx)
            .await?
            .map(|r| -> Result<ProductSnapshot, sqlx::Error> {
                Ok(ProductSnapshot {
                    id: r.try_get("id")?,
                    price: r.try_get("price")?,
                    stock: r.try_get("stock")?,
                })
            })
            .transpose()?;

        let plan = plan_order(&[line], |_| snapshot.as_ref())?;

        let sql = format!(
            "INSERT INTO pesanan (user_id, mainan_id, quantity, total_price, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            PESANAN_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(user_id)
            .bind(mainan_id)
            .bind(quantity)
            .bind(plan.total)
            .bind(OrderStatus::Pending.as_str())
            .fetch_one(&mut *tx)
            .await?;
        let pesanan = map_pesanan(&row)?;

        let sql = format!(
            "UPDATE mainan SET stock = stock - $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            ITEM_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(quantity)
            .bind(mainan_id)
            .fetch_one(&mut *tx)
            .await?;
        let mainan = map_item(&row, CatalogKind::Toy)?;

        tx.commit().await?;

        tracing::info!(
            pesanan_id = pesanan.id,
            user_id,
            mainan_id,
            quantity,
            "Pesanan created"
        );
        Ok((pesanan, mainan))
    }

    /// The user's pesanan, each with its toy
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<PesananView>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM pesanan WHERE user_id = $1 ORDER BY order_date DESC, id DESC",
            PESANAN_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;
        let mut list = rows.iter().map(map_pesanan).collect::<Result<Vec<_>, _>>()?;

        let mut mainan_ids: Vec<i64> = list.iter().map(|p| p.mainan_id).collect();
        mainan_ids.sort_unstable();
        mainan_ids.dedup();
        let toys: HashMap<i64, CatalogItem> =
            CatalogRepository::get_many(pool, CatalogKind::Toy, &mainan_ids)
                .await?
                .into_iter()
                .map(|t| (t.id, t))
                .collect();

        for pesanan in &mut list {
            pesanan.mainan = toys.get(&pesanan.mainan_id).cloned();
        }
        Ok(list)
    }

    /// Mark the caller's pesanan as paid.
    pub async fn pay(
        pool: &PgPool,
        user_id: i64,
        pesanan_id: i64,
    ) -> Result<PesananView, PesananError> {
        let mut tx = pool.begin().await?;

        let status: String =
            sqlx::query("SELECT status FROM pesanan WHERE id = $1 AND user_id = $2 FOR UPDATE")
                .bind(pesanan_id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(PesananError::NotFound)?
                .try_get("status")?;
        let current: OrderStatus = status.parse().map_err(decode_error)?;
        let next = current.pay()?;

        let sql = format!(
            "UPDATE pesanan SET status = $1 WHERE id = $2 RETURNING {}",
            PESANAN_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(next.as_str())
            .bind(pesanan_id)
            .fetch_one(&mut *tx)
            .await?;
        let pesanan = map_pesanan(&row)?;

        tx.commit().await?;
        tracing::info!(pesanan_id, user_id, "Pesanan paid");
        Ok(pesanan)
    }
}

fn map_pesanan(row: &PgRow) -> Result<PesananView, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(PesananView {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        mainan_id: row.try_get("mainan_id")?,
        quantity: row.try_get("quantity")?,
        total_price: row.try_get("total_price")?,
        status: status.parse().map_err(decode_error)?,
        order_date: row.try_get("order_date")?,
        mainan: None,
    })
}
