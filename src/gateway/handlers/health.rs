//! Health check handler

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use axum::{Json, extract::State, http::StatusCode};
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_i64)]
    pub timestamp_ms: i64,
    /// Build revision
    #[schema(example = "a1b2c3d")]
    pub version: &'static str,
}

/// Health check endpoint
///
/// Pings PostgreSQL at most once per interval; in between the last result
/// is reused. No internal details are exposed.
///
/// - Healthy: 200 OK + {code: 0, data: {timestamp_ms, version}}
/// - Unhealthy: 503 Service Unavailable + {code: 5001, msg: "unavailable"}
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = ApiResponse<HealthResponse>, content_type = "application/json"),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    static LAST_CHECK_MS: AtomicI64 = AtomicI64::new(0);
    static LAST_HEALTHY: AtomicBool = AtomicBool::new(false);
    const CHECK_INTERVAL_MS: i64 = 5000;

    let now_ms = chrono::Utc::now().timestamp_millis();

    let last_check = LAST_CHECK_MS.load(Ordering::Relaxed);
    let healthy = if now_ms - last_check > CHECK_INTERVAL_MS {
        LAST_CHECK_MS.store(now_ms, Ordering::Relaxed);
        let ok = match state.db.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("[HEALTH] PostgreSQL ping failed: {}", e);
                false
            }
        };
        LAST_HEALTHY.store(ok, Ordering::Relaxed);
        ok
    } else {
        LAST_HEALTHY.load(Ordering::Relaxed)
    };

    if healthy {
        (
            StatusCode::OK,
            Json(ApiResponse::success(HealthResponse {
                timestamp_ms: now_ms,
                version: env!("GIT_HASH"),
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                code: error_codes::SERVICE_UNAVAILABLE,
                msg: "unavailable".to_string(),
                data: None,
            }),
        )
    }
}
