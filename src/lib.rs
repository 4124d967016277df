//! Toko Backend - store and student-record REST service
//!
//! # Modules
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - PostgreSQL pool and schema bootstrap
//! - [`users`] - user records, profiles and photos
//! - [`user_auth`] - registration, login, JWT middleware
//! - [`catalog`] - products and mainan (toys), price conversion
//! - [`order`] - multi-product orders with stock reservation
//! - [`pesanan`] - single-toy orders and payment
//! - [`evaluation`] - student pass/fail evaluation
//! - [`gateway`] - HTTP router, envelope, OpenAPI

pub mod catalog;
pub mod config;
pub mod db;
pub mod evaluation;
pub mod gateway;
pub mod logging;
pub mod order;
pub mod pesanan;
pub mod user_auth;
pub mod users;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use gateway::{build_router, run_server, state::AppState};
