use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::CatalogKind;
use super::models::{CatalogItem, CatalogPatch, NewCatalogItem};
use crate::db::StoredImage;

pub(crate) const ITEM_COLUMNS: &str = "id, name, description, price, stock, image_url, \
                            (image IS NOT NULL) AS has_image, created_at, updated_at";

/// Catalog repository; every call names its table through [`CatalogKind`].
pub struct CatalogRepository;

impl CatalogRepository {
    pub async fn list(pool: &PgPool, kind: CatalogKind) -> Result<Vec<CatalogItem>, sqlx::Error> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", ITEM_COLUMNS, kind.table());
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        rows.iter().map(|r| map_item(r, kind)).collect()
    }

    pub async fn get(
        pool: &PgPool,
        kind: CatalogKind,
        id: i64,
    ) -> Result<Option<CatalogItem>, sqlx::Error> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", ITEM_COLUMNS, kind.table());
        let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
        row.map(|r| map_item(&r, kind)).transpose()
    }

    /// Rows for the given ids, in id order; unknown ids are skipped.
    pub async fn get_many(
        pool: &PgPool,
        kind: CatalogKind,
        ids: &[i64],
    ) -> Result<Vec<CatalogItem>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ANY($1) ORDER BY id",
            ITEM_COLUMNS,
            kind.table()
        );
        let rows = sqlx::query(&sql).bind(ids).fetch_all(pool).await?;
        rows.iter().map(|r| map_item(r, kind)).collect()
    }

    /// Case-insensitive substring match on `name`.
    pub async fn search(
        pool: &PgPool,
        kind: CatalogKind,
        name: &str,
    ) -> Result<Vec<CatalogItem>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {} WHERE name ILIKE $1 ESCAPE '\\' ORDER BY id",
            ITEM_COLUMNS,
            kind.table()
        );
        let rows = sqlx::query(&sql)
            .bind(like_pattern(name))
            .fetch_all(pool)
            .await?;
        rows.iter().map(|r| map_item(r, kind)).collect()
    }

    pub async fn create(
        pool: &PgPool,
        kind: CatalogKind,
        item: &NewCatalogItem,
    ) -> Result<CatalogItem, sqlx::Error> {
        let sql = format!(
            r#"INSERT INTO {} (name, description, price, stock, image_url)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {}"#,
            kind.table(),
            ITEM_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(item.stock)
            .bind(&item.image_url)
            .fetch_one(pool)
            .await?;
        map_item(&row, kind)
    }

    /// Merge update; `None` when the row does not exist.
    pub async fn update(
        pool: &PgPool,
        kind: CatalogKind,
        id: i64,
        patch: &CatalogPatch,
    ) -> Result<Option<CatalogItem>, sqlx::Error> {
        let sql = format!(
            r#"UPDATE {}
               SET name = COALESCE($1, name),
                   description = COALESCE($2, description),
                   price = COALESCE($3, price),
                   stock = COALESCE($4, stock),
                   image_url = COALESCE($5, image_url),
                   updated_at = NOW()
               WHERE id = $6
               RETURNING {}"#,
            kind.table(),
            ITEM_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(patch.price)
            .bind(patch.stock)
            .bind(&patch.image_url)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.map(|r| map_item(&r, kind)).transpose()
    }

    pub async fn delete(pool: &PgPool, kind: CatalogKind, id: i64) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the stored image; false when the row does not exist.
    pub async fn set_image(
        pool: &PgPool,
        kind: CatalogKind,
        id: i64,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<bool, sqlx::Error> {
        let sql = format!(
            "UPDATE {} SET image = $1, image_type = $2, updated_at = NOW() WHERE id = $3",
            kind.table()
        );
        let result = sqlx::query(&sql)
            .bind(bytes)
            .bind(content_type)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Outer `None`: no such row. Inner `None`: row without image.
    pub async fn get_image(
        pool: &PgPool,
        kind: CatalogKind,
        id: i64,
    ) -> Result<Option<Option<StoredImage>>, sqlx::Error> {
        let sql = format!("SELECT image, image_type FROM {} WHERE id = $1", kind.table());
        let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

        row.map(|r| {
            let bytes: Option<Vec<u8>> = r.try_get("image")?;
            let content_type: Option<String> = r.try_get("image_type")?;
            Ok(bytes.map(|bytes| StoredImage {
                bytes,
                content_type,
            }))
        })
        .transpose()
    }
}

/// `%term%` with LIKE wildcards in the term escaped.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub(crate) fn map_item(row: &PgRow, kind: CatalogKind) -> Result<CatalogItem, sqlx::Error> {
    let id: i64 = row.try_get("id")?;
    let has_image: bool = row.try_get("has_image")?;
    Ok(CatalogItem {
        id,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        stock: row.try_get("stock")?,
        image_url: row.try_get("image_url")?,
        image: has_image.then(|| kind.image_url(id)),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
