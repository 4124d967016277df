//! Multi-product orders with transactional stock decrement.

pub mod error;
pub mod handlers;
pub mod models;
pub mod plan;
pub mod repository;

pub use error::OrderError;
pub use models::{OrderItemView, OrderStatus, OrderView};
pub use plan::{LineRequest, OrderPlan, PlanError, ProductSnapshot, merge_lines, plan_order};
pub use repository::{OrderRepository, OrderScope};
