//! Gateway types module
//!
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`MessageData`]: Action confirmation payload
//! - [`error_codes`]: Envelope error codes

pub mod response;

pub use response::{ApiResponse, MessageData, error_codes};
