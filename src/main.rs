//! Toko backend server entry point
//!
//! ```text
//! cargo run -- --env dev --port 5000
//! ```

use std::sync::Arc;

use anyhow::{Context, bail};

use toko_backend::config::AppConfig;
use toko_backend::db::Database;
use toko_backend::gateway::{self, state::AppState};
use toko_backend::logging::init_logging;
use toko_backend::user_auth::UserAuthService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }
    let _log_guard = init_logging(&config);

    tracing::info!(
        env = %env,
        version = env!("GIT_HASH"),
        "Starting toko backend"
    );

    if config.auth.jwt_secret.is_empty() {
        bail!("auth.jwt_secret is empty; set it in config/{}.yaml or JWT_SECRET", env);
    }
    let database_url = config
        .database_url()
        .context("postgres_url is not configured; set it in the config file or DATABASE_URL")?
        .to_string();

    let db = Database::connect(&database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    db.init_schema()
        .await
        .context("Failed to initialize database schema")?;
    let db = Arc::new(db);

    let user_auth = UserAuthService::new(
        db.pool().clone(),
        &config.auth.jwt_secret,
        config.auth.token_ttl_hours,
    );
    if let Some(seed) = &config.auth.bootstrap_admin {
        user_auth
            .ensure_admin(seed)
            .await
            .context("Failed to create bootstrap admin")?;
    }

    let state = Arc::new(AppState::new(
        db,
        Arc::new(user_auth),
        config.uploads.max_image_bytes,
    ));

    gateway::run_server(&config, state).await
}
