mod config;
mod routes;
mod singleton;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};

use todoshare_core::{FileStore, SystemClock};
use todoshare_google::{GoogleAuth, OAuthConfig, SessionVault};

use crate::config::{CliArgs, ServerConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();
    let config = ServerConfig::load(&cli).context("Error loading configuration")?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // One server per session file
    let _lock = singleton::acquire_lock(&config.session_file)?;

    let store = Arc::new(FileStore::new(&config.session_file));
    let vault = SessionVault::new(store, Arc::new(SystemClock));
    let oauth = OAuthConfig::google(config.credentials.clone(), &config.public_origin);
    let auth = GoogleAuth::new(oauth, vault);
    tracing::info!(redirect_uri = %auth.config().redirect_uri, session_file = %config.session_file.display(), "google oauth configured");

    let state = AppState::with_fixtures(auth);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "todoshare-server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
