use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

use super::token::{Claims, TokenIssuer};
use crate::config::AdminSeed;
use crate::db::is_unique_violation;
use crate::gateway::error::ApiError;
use crate::users::{NewUser, Role, UserProfile, UserRepository};

/// User Registration Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Student number, optional alternative login identifier
    #[schema(example = "2021001")]
    #[validate(length(min = 1, max = 32))]
    pub nim: Option<String>,
    #[schema(example = "Ahmad")]
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[schema(example = "ahmad@example.com")]
    #[validate(email)]
    pub email: String,
    #[schema(example = "password123")]
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

/// User Login Request; either `email` or `nim` identifies the account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ahmad@example.com")]
    pub email: Option<String>,
    #[schema(example = "2021001")]
    pub nim: Option<String>,
    #[schema(example = "password123")]
    pub password: String,
}

/// Auth Response (JWT)
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("NIM already registered")]
    NimTaken,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Email or NIM is required")]
    MissingIdentifier,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthServiceError> for ApiError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::NimTaken | AuthServiceError::EmailTaken => {
                ApiError::duplicate(err.to_string())
            }
            AuthServiceError::MissingIdentifier => ApiError::bad_request(err.to_string()),
            AuthServiceError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            AuthServiceError::Hashing(_) | AuthServiceError::Token(_) => {
                tracing::error!("Auth failure: {}", err);
                ApiError::internal("Internal server error")
            }
            AuthServiceError::Database(e) => ApiError::db_error(e),
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthServiceError::Hashing(e.to_string()))
}

/// False for a wrong password and for an unparsable stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub struct UserAuthService {
    db: PgPool,
    tokens: TokenIssuer,
}

impl UserAuthService {
    pub fn new(db: PgPool, jwt_secret: &str, token_ttl_hours: i64) -> Self {
        Self {
            db,
            tokens: TokenIssuer::new(jwt_secret, Duration::hours(token_ttl_hours)),
        }
    }

    /// Register a new user with role `user`
    pub async fn register(&self, req: &RegisterRequest) -> Result<i64, AuthServiceError> {
        if let Some(nim) = req.nim.as_deref() {
            if UserRepository::get_by_nim(&self.db, nim).await?.is_some() {
                return Err(AuthServiceError::NimTaken);
            }
        }
        if UserRepository::get_by_email(&self.db, &req.email)
            .await?
            .is_some()
        {
            return Err(AuthServiceError::EmailTaken);
        }

        let password_hash = hash_password(&req.password)?;
        let new_user = NewUser {
            nim: req.nim.as_deref(),
            name: &req.name,
            email: &req.email,
            password_hash: &password_hash,
            role: Role::User,
        };

        // Concurrent registrations can still race past the lookups above.
        UserRepository::create(&self.db, &new_user)
            .await
            .map_err(map_duplicate)
    }

    /// Login by email or nim and issue a JWT
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AuthServiceError> {
        let user = match (non_empty(&req.email), non_empty(&req.nim)) {
            (Some(email), _) => UserRepository::get_by_email(&self.db, email).await?,
            (None, Some(nim)) => UserRepository::get_by_nim(&self.db, nim).await?,
            (None, None) => return Err(AuthServiceError::MissingIdentifier),
        }
        .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(&req.password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, user.role)?;
        Ok(AuthResponse {
            token,
            user: user.profile(),
        })
    }

    /// Create the configured admin account unless its email already exists.
    pub async fn ensure_admin(&self, seed: &AdminSeed) -> Result<(), AuthServiceError> {
        if let Some(existing) = UserRepository::get_by_email(&self.db, &seed.email).await? {
            if existing.role != Role::Admin {
                tracing::warn!(
                    user_id = existing.id,
                    "Bootstrap admin email belongs to a non-admin account"
                );
            }
            return Ok(());
        }

        let password_hash = hash_password(&seed.password)?;
        let user_id = UserRepository::create(
            &self.db,
            &NewUser {
                nim: None,
                name: &seed.name,
                email: &seed.email,
                password_hash: &password_hash,
                role: Role::Admin,
            },
        )
        .await?;
        tracing::info!(user_id, "Bootstrap admin created");
        Ok(())
    }

    /// Verify JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthServiceError> {
        Ok(self.tokens.verify(token)?)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn map_duplicate(err: sqlx::Error) -> AuthServiceError {
    if !is_unique_violation(&err) {
        return AuthServiceError::Database(err);
    }
    let on_nim = err
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        .is_some_and(|name| name.contains("nim"));
    if on_nim {
        AuthServiceError::NimTaken
    } else {
        AuthServiceError::EmailTaken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("password123", &hash));
        assert!(!verify_password("password124", &hash));
    }

    #[test]
    fn test_verify_against_garbage_hash() {
        assert!(!verify_password("password123", "plaintext"));
    }

    #[test]
    fn test_register_validation() {
        let req = RegisterRequest {
            nim: None,
            name: "Ahmad".to_string(),
            email: "ahmad@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(req.validate().is_ok());

        let short = RegisterRequest {
            password: "short".to_string(),
            ..req
        };
        let errors = short.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_error_mapping() {
        let err: ApiError = AuthServiceError::NimTaken.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "NIM already registered");

        let err: ApiError = AuthServiceError::EmailTaken.into();
        assert_eq!(err.message, "Email already registered");

        let err: ApiError = AuthServiceError::InvalidCredentials.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let err: ApiError = AuthServiceError::Hashing("boom".into()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("boom"));
    }

    #[test]
    fn test_non_empty_identifier() {
        assert_eq!(non_empty(&Some("  ".to_string())), None);
        assert_eq!(non_empty(&Some(" a@b.c ".to_string())), Some("a@b.c"));
        assert_eq!(non_empty(&None), None);
    }
}
