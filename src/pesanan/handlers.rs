use axum::{Extension, extract::State};
use std::sync::Arc;

use super::models::{
    CreatePesananRequest, PayRequest, PayResponse, PesananView, ToyOrderRequest, ToyOrderResponse,
};
use super::repository::PesananRepository;
use crate::gateway::error::{ApiResult, created, ok};
use crate::gateway::extract::ValidatedJson;
use crate::gateway::state::AppState;
use crate::gateway::types::ApiResponse;
use crate::user_auth::middleware::AuthenticatedUser;

/// Order a toy
///
/// POST /api/v1/pesanan
#[utoipa::path(
    post,
    path = "/api/v1/pesanan",
    request_body = CreatePesananRequest,
    responses(
        (status = 201, description = "Pesanan created", body = ApiResponse<PesananView>),
        (status = 400, description = "Bad quantity or not enough stock"),
        (status = 404, description = "Mainan not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Pesanan"
)]
pub async fn create_pesanan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<CreatePesananRequest>,
) -> ApiResult<PesananView> {
    let (pesanan, _) =
        PesananRepository::create(state.db.pool(), user.user_id, req.mainan_id, req.quantity)
            .await?;
    created(pesanan)
}

/// Caller's pesanan with their toys
///
/// GET /api/v1/pesanan
#[utoipa::path(
    get,
    path = "/api/v1/pesanan",
    responses(
        (status = 200, description = "Pesanan list", body = ApiResponse<Vec<PesananView>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Pesanan"
)]
pub async fn list_pesanan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<PesananView>> {
    ok(PesananRepository::list_for_user(state.db.pool(), user.user_id).await?)
}

/// Pay a pending pesanan
///
/// POST /api/v1/pesanan/pay
#[utoipa::path(
    post,
    path = "/api/v1/pesanan/pay",
    request_body = PayRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<PayResponse>),
        (status = 400, description = "Already paid or cancelled"),
        (status = 404, description = "Pesanan not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Pesanan"
)]
pub async fn pay_pesanan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<PayRequest>,
) -> ApiResult<PayResponse> {
    let pesanan = PesananRepository::pay(state.db.pool(), user.user_id, req.pesanan_id).await?;
    ok(PayResponse {
        message: "Payment successful".to_string(),
        pesanan,
    })
}

/// Order a toy by id; also returns the toy with its new stock
///
/// POST /api/v1/mainan/order
#[utoipa::path(
    post,
    path = "/api/v1/mainan/order",
    request_body = ToyOrderRequest,
    responses(
        (status = 200, description = "Order successful", body = ApiResponse<ToyOrderResponse>),
        (status = 400, description = "Bad quantity or not enough stock"),
        (status = 404, description = "Toy not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mainan"
)]
pub async fn order_toy(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<ToyOrderRequest>,
) -> ApiResult<ToyOrderResponse> {
    let (pesanan, mainan) =
        PesananRepository::create(state.db.pool(), user.user_id, req.id, req.quantity).await?;
    ok(ToyOrderResponse {
        message: "Order successful".to_string(),
        mainan,
        pesanan,
    })
}
