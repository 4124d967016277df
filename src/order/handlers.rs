use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::error::OrderError;
use super::models::{CreateOrderRequest, OrderStatus, OrderView, UpdateOrderRequest};
use super::repository::{OrderRepository, OrderScope};
use crate::gateway::error::{ApiError, ApiResult, created, ok};
use crate::gateway::extract::ValidatedJson;
use crate::gateway::state::AppState;
use crate::gateway::types::ApiResponse;
use crate::user_auth::middleware::AuthenticatedUser;

/// Owner or admin may see an order; anyone else gets 404.
async fn ensure_visible(
    state: &AppState,
    user: &AuthenticatedUser,
    order_id: i64,
) -> Result<(), ApiError> {
    match OrderRepository::owner_of(state.db.pool(), order_id).await? {
        Some(owner) if owner == user.user_id || user.is_admin() => Ok(()),
        _ => Err(OrderError::NotFound.into()),
    }
}

/// Place an order
///
/// POST /api/v1/orders
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderView>),
        (status = 400, description = "Empty order, bad quantity, unknown product or not enough stock"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<CreateOrderRequest>,
) -> ApiResult<OrderView> {
    match OrderRepository::create(state.db.pool(), user.user_id, &req.items).await {
        Ok(order) => created(order),
        Err(e @ OrderError::Plan(_)) => {
            tracing::warn!(user_id = user.user_id, "Order rejected: {}", e);
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Caller's orders, or every order for an admin
///
/// GET /api/v1/orders
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Orders, newest first", body = ApiResponse<Vec<OrderView>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<OrderView>> {
    let scope = if user.is_admin() {
        OrderScope::All
    } else {
        OrderScope::User(user.user_id)
    };
    ok(OrderRepository::list(state.db.pool(), scope).await?)
}

/// One order with items and products
///
/// GET /api/v1/orders/{id}
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order", body = ApiResponse<OrderView>),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderView> {
    ensure_visible(&state, &user, order_id).await?;
    let order = OrderRepository::find(state.db.pool(), order_id)
        .await?
        .ok_or(OrderError::NotFound)?;
    ok(order)
}

/// Change the order status
///
/// PUT /api/v1/orders/{id}
#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<OrderView>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(order_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateOrderRequest>,
) -> ApiResult<OrderView> {
    let status: OrderStatus = req.status.parse().map_err(OrderError::from)?;
    ensure_visible(&state, &user, order_id).await?;

    let order = OrderRepository::update_status(state.db.pool(), order_id, status)
        .await?
        .ok_or(OrderError::NotFound)?;
    tracing::info!(order_id, status = %status, "Order status updated");
    ok(order)
}

/// Delete an order and its items
///
/// DELETE /api/v1/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(order_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ensure_visible(&state, &user, order_id).await?;
    if !OrderRepository::delete(state.db.pool(), order_id).await? {
        return Err(OrderError::NotFound.into());
    }
    tracing::info!(order_id, user_id = user.user_id, "Order deleted");
    Ok(StatusCode::NO_CONTENT)
}
