//! User accounts: profile, admin management and profile photos.

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{Role, UpdateProfileRequest, UserProfile, UserRecord};
pub use repository::{NewUser, UserRepository};
