//! Catalog endpoints.
//!
//! Products and toys share the implementations below; the public functions
//! are thin per-route wrappers so each route keeps its own OpenAPI entry.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use super::currency::PriceConversion;
use super::models::{CatalogItem, CatalogPatch, NewCatalogItem};
use super::repository::CatalogRepository;
use super::CatalogKind;
use crate::db::is_foreign_key_violation;
use crate::gateway::error::{ApiError, ApiResult, created, ok};
use crate::gateway::extract::ValidatedJson;
use crate::gateway::state::AppState;
use crate::gateway::types::ApiResponse;
use crate::gateway::upload::{ImageBody, read_image_field};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring of the toy name
    pub name: Option<String>,
}

async fn list_items(state: &AppState, kind: CatalogKind) -> ApiResult<Vec<CatalogItem>> {
    ok(CatalogRepository::list(state.db.pool(), kind).await?)
}

async fn get_item(state: &AppState, kind: CatalogKind, id: i64) -> ApiResult<CatalogItem> {
    let item = CatalogRepository::get(state.db.pool(), kind, id)
        .await?
        .ok_or_else(|| ApiError::not_found(kind.not_found_message()))?;
    ok(item)
}

async fn create_item(
    state: &AppState,
    kind: CatalogKind,
    req: NewCatalogItem,
) -> ApiResult<CatalogItem> {
    let item = CatalogRepository::create(state.db.pool(), kind, &req).await?;
    tracing::info!(table = kind.table(), id = item.id, "Catalog item created");
    created(item)
}

async fn update_item(
    state: &AppState,
    kind: CatalogKind,
    id: i64,
    patch: CatalogPatch,
) -> ApiResult<CatalogItem> {
    let item = CatalogRepository::update(state.db.pool(), kind, id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found(kind.not_found_message()))?;
    ok(item)
}

async fn delete_item(state: &AppState, kind: CatalogKind, id: i64) -> Result<StatusCode, ApiError> {
    let deleted = CatalogRepository::delete(state.db.pool(), kind, id)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ApiError::invalid_state(format!(
                    "{} is referenced by existing orders",
                    kind.label()
                ))
            } else {
                ApiError::db_error(e)
            }
        })?;
    if !deleted {
        return Err(ApiError::not_found(kind.not_found_message()));
    }
    tracing::info!(table = kind.table(), id, "Catalog item deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn upload_item_image(
    state: &AppState,
    kind: CatalogKind,
    id: i64,
    multipart: Multipart,
) -> ApiResult<CatalogItem> {
    let image = read_image_field(multipart, "image", state.max_image_bytes).await?;
    let pool = state.db.pool();
    if !CatalogRepository::set_image(pool, kind, id, &image.bytes, &image.content_type).await? {
        return Err(ApiError::not_found(kind.not_found_message()));
    }
    tracing::info!(
        table = kind.table(),
        id,
        size = image.bytes.len(),
        "Catalog image stored"
    );
    get_item(state, kind, id).await
}

async fn read_item_image(
    state: &AppState,
    kind: CatalogKind,
    id: i64,
) -> Result<ImageBody, ApiError> {
    let image = CatalogRepository::get_image(state.db.pool(), kind, id)
        .await?
        .ok_or_else(|| ApiError::not_found(kind.not_found_message()))?
        .ok_or_else(|| ApiError::not_found("Image not found"))?;
    Ok(image.into())
}

// ============================================================================
// Products (admin only)
// ============================================================================

/// All products
///
/// GET /api/v1/products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "Products", body = ApiResponse<Vec<CatalogItem>>),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Vec<CatalogItem>> {
    list_items(&state, CatalogKind::Product).await
}

/// One product
///
/// GET /api/v1/products/{id}
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<CatalogItem>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<CatalogItem> {
    get_item(&state, CatalogKind::Product, id).await
}

/// Create a product
///
/// POST /api/v1/products
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = NewCatalogItem,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<CatalogItem>),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<NewCatalogItem>,
) -> ApiResult<CatalogItem> {
    create_item(&state, CatalogKind::Product, req).await
}

/// Update a product; absent fields are kept
///
/// PUT /api/v1/products/{id}
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    request_body = CatalogPatch,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<CatalogItem>),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(patch): ValidatedJson<CatalogPatch>,
) -> ApiResult<CatalogItem> {
    update_item(&state, CatalogKind::Product, id, patch).await
}

/// Delete a product
///
/// DELETE /api/v1/products/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Product is referenced by existing orders"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    delete_item(&state, CatalogKind::Product, id).await
}

/// Attach an image (multipart field `image`)
///
/// POST /api/v1/products/{id}/image
#[utoipa::path(
    post,
    path = "/api/v1/products/{id}/image",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Image stored", body = ApiResponse<CatalogItem>),
        (status = 400, description = "Missing, oversized or non-image file"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn upload_product_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<CatalogItem> {
    upload_item_image(&state, CatalogKind::Product, id, multipart).await
}

/// Raw product image
///
/// GET /api/v1/products/{id}/image
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/image",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (status = 404, description = "Product or image not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn get_product_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<ImageBody, ApiError> {
    read_item_image(&state, CatalogKind::Product, id).await
}

// ============================================================================
// Mainan (public reads, authenticated writes)
// ============================================================================

/// All toys
///
/// GET /api/v1/mainan
#[utoipa::path(
    get,
    path = "/api/v1/mainan",
    responses((status = 200, description = "Toys", body = ApiResponse<Vec<CatalogItem>>)),
    tag = "Mainan"
)]
pub async fn list_mainan(State(state): State<Arc<AppState>>) -> ApiResult<Vec<CatalogItem>> {
    list_items(&state, CatalogKind::Toy).await
}

/// Fresh toy list (same as the plain listing)
///
/// GET /api/v1/mainan/refresh
#[utoipa::path(
    get,
    path = "/api/v1/mainan/refresh",
    responses((status = 200, description = "Toys", body = ApiResponse<Vec<CatalogItem>>)),
    tag = "Mainan"
)]
pub async fn refresh_mainan(State(state): State<Arc<AppState>>) -> ApiResult<Vec<CatalogItem>> {
    list_items(&state, CatalogKind::Toy).await
}

/// Search toys by name
///
/// GET /api/v1/mainan/search?name=
#[utoipa::path(
    get,
    path = "/api/v1/mainan/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching toys", body = ApiResponse<Vec<CatalogItem>>),
        (status = 400, description = "Missing name parameter")
    ),
    tag = "Mainan"
)]
pub async fn search_mainan(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<CatalogItem>> {
    let name = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Parameter 'name' is required"))?;
    ok(CatalogRepository::search(state.db.pool(), CatalogKind::Toy, name).await?)
}

/// Toy prices in USD, EUR and JPY
///
/// GET /api/v1/mainan/konversi/harga
#[utoipa::path(
    get,
    path = "/api/v1/mainan/konversi/harga",
    responses((status = 200, description = "Converted prices", body = ApiResponse<Vec<PriceConversion>>)),
    tag = "Mainan"
)]
pub async fn convert_mainan_prices(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<PriceConversion>> {
    let toys = CatalogRepository::list(state.db.pool(), CatalogKind::Toy).await?;
    ok(toys.iter().map(PriceConversion::from_item).collect())
}

/// One toy
///
/// GET /api/v1/mainan/{id}
#[utoipa::path(
    get,
    path = "/api/v1/mainan/{id}",
    params(("id" = i64, Path, description = "Toy id")),
    responses(
        (status = 200, description = "Toy", body = ApiResponse<CatalogItem>),
        (status = 404, description = "Toy not found")
    ),
    tag = "Mainan"
)]
pub async fn get_mainan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<CatalogItem> {
    get_item(&state, CatalogKind::Toy, id).await
}

/// Create a toy
///
/// POST /api/v1/mainan
#[utoipa::path(
    post,
    path = "/api/v1/mainan",
    request_body = NewCatalogItem,
    responses(
        (status = 201, description = "Toy created", body = ApiResponse<CatalogItem>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Mainan"
)]
pub async fn create_mainan(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<NewCatalogItem>,
) -> ApiResult<CatalogItem> {
    create_item(&state, CatalogKind::Toy, req).await
}

/// Update a toy; absent fields are kept
///
/// PUT /api/v1/mainan/{id}
#[utoipa::path(
    put,
    path = "/api/v1/mainan/{id}",
    params(("id" = i64, Path, description = "Toy id")),
    request_body = CatalogPatch,
    responses(
        (status = 200, description = "Toy updated", body = ApiResponse<CatalogItem>),
        (status = 404, description = "Toy not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mainan"
)]
pub async fn update_mainan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(patch): ValidatedJson<CatalogPatch>,
) -> ApiResult<CatalogItem> {
    update_item(&state, CatalogKind::Toy, id, patch).await
}

/// Delete a toy and its pesanan
///
/// DELETE /api/v1/mainan/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/mainan/{id}",
    params(("id" = i64, Path, description = "Toy id")),
    responses(
        (status = 204, description = "Toy deleted"),
        (status = 404, description = "Toy not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mainan"
)]
pub async fn delete_mainan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    delete_item(&state, CatalogKind::Toy, id).await
}

/// Attach an image (multipart field `image`)
///
/// POST /api/v1/mainan/{id}/image
#[utoipa::path(
    post,
    path = "/api/v1/mainan/{id}/image",
    params(("id" = i64, Path, description = "Toy id")),
    responses(
        (status = 200, description = "Image stored", body = ApiResponse<CatalogItem>),
        (status = 400, description = "Missing, oversized or non-image file"),
        (status = 404, description = "Toy not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mainan"
)]
pub async fn upload_mainan_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<CatalogItem> {
    upload_item_image(&state, CatalogKind::Toy, id, multipart).await
}

/// Raw toy image
///
/// GET /api/v1/mainan/{id}/image
#[utoipa::path(
    get,
    path = "/api/v1/mainan/{id}/image",
    params(("id" = i64, Path, description = "Toy id")),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (status = 404, description = "Toy or image not found")
    ),
    tag = "Mainan"
)]
pub async fn get_mainan_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<ImageBody, ApiError> {
    read_item_image(&state, CatalogKind::Toy, id).await
}
