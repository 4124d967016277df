//! Single-toy orders ("pesanan") with a pending → paid flow.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

pub use error::PesananError;
pub use models::PesananView;
pub use repository::PesananRepository;
