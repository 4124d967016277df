//! Data models for user accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Stored user row (no binary columns)
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub nim: Option<String>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub has_photo: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            nim: self.nim.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            photo: self.has_photo.then(|| photo_url(self.id)),
            created_at: self.created_at,
        }
    }
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub nim: Option<String>,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Relative URL of the photo endpoint, null when no photo is stored
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub fn photo_url(user_id: i64) -> String {
    format!("/api/v1/users/{}/photo", user_id)
}

/// PUT /users/profile body; absent fields keep their value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(has_photo: bool) -> UserRecord {
        UserRecord {
            id: 7,
            nim: Some("2021001".to_string()),
            name: "Ahmad".to_string(),
            email: "ahmad@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: Role::User,
            has_photo,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_round_trip_through_text() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_profile_never_carries_password_hash() {
        let json = serde_json::to_value(record(false).profile()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "user");
        assert!(json["photo"].is_null());
    }

    #[test]
    fn test_profile_photo_url() {
        let profile = record(true).profile();
        assert_eq!(profile.photo.as_deref(), Some("/api/v1/users/7/photo"));
    }

    #[test]
    fn test_update_profile_validation() {
        let ok = UpdateProfileRequest {
            name: Some("New".to_string()),
            email: None,
        };
        assert!(ok.validate().is_ok());

        let bad = UpdateProfileRequest {
            name: Some(String::new()),
            email: Some("not-an-email".to_string()),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
    }
}
