//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:5000/docs`
//! - OpenAPI JSON: `http://localhost:5000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::catalog::currency::PriceConversion;
use crate::catalog::{CatalogItem, CatalogPatch, NewCatalogItem};
use crate::evaluation::handlers::SampleEvaluation;
use crate::evaluation::{Criteria, EvaluationResult, StudentRecord};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::MessageData;
use crate::order::models::{CreateOrderRequest, OrderProduct, UpdateOrderRequest};
use crate::order::{LineRequest, OrderItemView, OrderStatus, OrderView};
use crate::pesanan::models::{
    CreatePesananRequest, PayRequest, PayResponse, PesananView, ToyOrderRequest, ToyOrderResponse,
};
use crate::user_auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::users::{Role, UpdateProfileRequest, UserProfile};

/// JWT bearer authentication security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token from POST /api/v1/auth/login: Authorization: Bearer <token>",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toko Backend API",
        version = "1.0.0",
        description = "Store backend: products, orders, toys (mainan), toy orders (pesanan), users and student evaluation.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        // Auth
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::logout,
        // Users
        crate::users::handlers::get_profile,
        crate::users::handlers::update_profile,
        crate::users::handlers::list_users,
        crate::users::handlers::delete_user,
        crate::users::handlers::upload_photo,
        crate::users::handlers::get_photo,
        // Products
        crate::catalog::handlers::list_products,
        crate::catalog::handlers::get_product,
        crate::catalog::handlers::create_product,
        crate::catalog::handlers::update_product,
        crate::catalog::handlers::delete_product,
        crate::catalog::handlers::upload_product_image,
        crate::catalog::handlers::get_product_image,
        // Orders
        crate::order::handlers::create_order,
        crate::order::handlers::list_orders,
        crate::order::handlers::get_order,
        crate::order::handlers::update_order,
        crate::order::handlers::delete_order,
        // Mainan
        crate::catalog::handlers::list_mainan,
        crate::catalog::handlers::refresh_mainan,
        crate::catalog::handlers::search_mainan,
        crate::catalog::handlers::convert_mainan_prices,
        crate::catalog::handlers::get_mainan,
        crate::catalog::handlers::create_mainan,
        crate::catalog::handlers::update_mainan,
        crate::catalog::handlers::delete_mainan,
        crate::catalog::handlers::upload_mainan_image,
        crate::catalog::handlers::get_mainan_image,
        crate::pesanan::handlers::order_toy,
        // Pesanan
        crate::pesanan::handlers::create_pesanan,
        crate::pesanan::handlers::list_pesanan,
        crate::pesanan::handlers::pay_pesanan,
        // Evaluation
        crate::evaluation::handlers::evaluate,
        crate::evaluation::handlers::list_samples,
    ),
    components(
        schemas(
            HealthResponse,
            MessageData,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            Role,
            UserProfile,
            UpdateProfileRequest,
            CatalogItem,
            NewCatalogItem,
            CatalogPatch,
            PriceConversion,
            LineRequest,
            CreateOrderRequest,
            UpdateOrderRequest,
            OrderStatus,
            OrderProduct,
            OrderItemView,
            OrderView,
            CreatePesananRequest,
            ToyOrderRequest,
            PayRequest,
            PayResponse,
            PesananView,
            ToyOrderResponse,
            StudentRecord,
            Criteria,
            EvaluationResult,
            SampleEvaluation,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and logout"),
        (name = "User", description = "Profiles, photos and admin user management"),
        (name = "Products", description = "Product catalog (admin only)"),
        (name = "Orders", description = "Multi-product orders (auth required)"),
        (name = "Mainan", description = "Toy catalog: public reads, authenticated writes"),
        (name = "Pesanan", description = "Single-toy orders and payment (auth required)"),
        (name = "Evaluation", description = "Student pass/fail evaluation"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_doc_generates() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Toko Backend API");
        assert_eq!(doc.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let json_str = ApiDoc::openapi().to_json().unwrap();
        assert!(json_str.contains("Toko Backend API"));
        assert!(json_str.contains("nilaiTugas"));
    }

    #[test]
    fn test_endpoints_registered() {
        let paths = ApiDoc::openapi().paths;
        for path in [
            "/api/v1/health",
            "/api/v1/auth/login",
            "/api/v1/orders",
            "/api/v1/orders/{id}",
            "/api/v1/products/{id}/image",
            "/api/v1/mainan/search",
            "/api/v1/mainan/konversi/harga",
            "/api/v1/mainan/order",
            "/api/v1/pesanan/pay",
            "/api/v1/users/{id}/photo",
            "/api/v1/evaluation",
        ] {
            assert!(paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_security_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("should have components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
