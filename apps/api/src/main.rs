mod colleges;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::colleges::store::RecordStore;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::{build_gateway, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting College Advisor v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the JSON record store (creates an empty one on first run)
    let store = RecordStore::open(&config.db_path)
        .await
        .with_context(|| format!("Failed to open college store at {}", config.db_path.display()))?;
    info!("College store at {}", store.path().display());

    // Initialize the AI gateway
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set; AI actions return no results until a key is entered");
    }
    let gateway = build_gateway(&config, config.gemini_api_key.clone())?;
    info!("AI gateway initialized (model: {})", llm_client::MODEL);

    let state = AppState::new(config.clone(), store, gateway);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
