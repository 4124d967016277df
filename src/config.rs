use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    /// PostgreSQL connection URL (overridden by `DATABASE_URL`)
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret (overridden by `JWT_SECRET`)
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Admin account created at startup when its email is not registered yet
    #[serde(default)]
    pub bootstrap_admin: Option<AdminSeed>,
}

fn default_token_ttl_hours() -> i64 {
    24
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            bootstrap_admin: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_image_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 2 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml` and apply environment overrides.
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", config_path))?;
        config.apply_overrides(
            std::env::var("JWT_SECRET").ok(),
            std::env::var("DATABASE_URL").ok(),
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn apply_overrides(&mut self, jwt_secret: Option<String>, database_url: Option<String>) {
        if let Some(secret) = jwt_secret.filter(|s| !s.is_empty()) {
            self.auth.jwt_secret = secret;
        }
        if let Some(url) = database_url.filter(|s| !s.is_empty()) {
            self.postgres_url = Some(url);
        }
    }

    pub fn database_url(&self) -> Option<&str> {
        self.postgres_url.as_deref()
    }
}
