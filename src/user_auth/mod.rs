//! Registration, login and bearer-token authentication.

pub mod handlers;
pub mod middleware;
pub mod service;
pub mod token;

pub use middleware::{AuthenticatedUser, jwt_auth_middleware, require_admin};
pub use service::{AuthResponse, AuthServiceError, LoginRequest, RegisterRequest, UserAuthService};
pub use token::{Claims, TokenIssuer};
