pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;
pub mod upload;

use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::handlers as catalog;
use crate::config::AppConfig;
use crate::evaluation::handlers as evaluation;
use crate::order::handlers as orders;
use crate::pesanan::handlers as pesanan;
use crate::user_auth::handlers as auth;
use crate::user_auth::{jwt_auth_middleware, require_admin};
use crate::users::handlers as users;
use state::AppState;

/// Multipart framing allowance on top of the image limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the complete HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let jwt = from_fn_with_state(state.clone(), jwt_auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/logout", post(auth::logout))
                .route_layer(jwt.clone()),
        );

    let user_routes = Router::new()
        .route("/{id}/photo", get(users::get_photo))
        .merge(
            Router::new()
                .route(
                    "/profile",
                    get(users::get_profile).put(users::update_profile),
                )
                .route("/profile/photo", post(users::upload_photo))
                .route_layer(jwt.clone()),
        )
        .merge(
            Router::new()
                .route("/", get(users::list_users))
                .route("/{id}", axum::routing::delete(users::delete_user))
                .route_layer(from_fn(require_admin))
                .route_layer(jwt.clone()),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route(
            "/{id}",
            get(catalog::get_product)
                .put(catalog::update_product)
                .delete(catalog::delete_product),
        )
        .route(
            "/{id}/image",
            get(catalog::get_product_image).post(catalog::upload_product_image),
        )
        .route_layer(from_fn(require_admin))
        .route_layer(jwt.clone());

    let mainan_routes = Router::new()
        .route("/", get(catalog::list_mainan))
        .route("/refresh", get(catalog::refresh_mainan))
        .route("/search", get(catalog::search_mainan))
        .route("/konversi/harga", get(catalog::convert_mainan_prices))
        .route("/{id}", get(catalog::get_mainan))
        .route("/{id}/image", get(catalog::get_mainan_image))
        .merge(
            Router::new()
                .route("/", post(catalog::create_mainan))
                .route("/order", post(pesanan::order_toy))
                .route(
                    "/{id}",
                    put(catalog::update_mainan).delete(catalog::delete_mainan),
                )
                .route("/{id}/image", post(catalog::upload_mainan_image))
                .route_layer(jwt.clone()),
        );

    let order_routes = Router::new()
        .route("/", get(orders::list_orders).post(orders::create_order))
        .route(
            "/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route_layer(jwt.clone());

    let pesanan_routes = Router::new()
        .route(
            "/",
            get(pesanan::list_pesanan).post(pesanan::create_pesanan),
        )
        .route("/pay", post(pesanan::pay_pesanan))
        .route_layer(jwt);

    let evaluation_routes = Router::new()
        .route("/", post(evaluation::evaluate))
        .route("/samples", get(evaluation::list_samples));

    let body_limit = state.max_image_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/products", product_routes)
        .nest("/api/v1/mainan", mainan_routes)
        .nest("/api/v1/orders", order_routes)
        .nest("/api/v1/pesanan", pesanan_routes)
        .nest("/api/v1/evaluation", evaluation_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        // Stateless, added after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(config: &AppConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "Failed to bind to {} (port {} may already be in use)",
            addr, config.gateway.port
        )
    })?;

    tracing::info!(%addr, "Gateway listening");
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
