use std::sync::Arc;

use crate::db::Database;
use crate::user_auth::UserAuthService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL pool
    pub db: Arc<Database>,
    /// Registration, login and token verification
    pub user_auth: Arc<UserAuthService>,
    /// Upper bound for uploaded images
    pub max_image_bytes: usize,
}

impl AppState {
    pub fn new(db: Arc<Database>, user_auth: Arc<UserAuthService>, max_image_bytes: usize) -> Self {
        Self {
            db,
            user_auth,
            max_image_bytes,
        }
    }
}
