mod config;
mod errors;
mod import;
mod models;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::import::parser::ResumeParser;
use crate::resume::service::ResumeService;
use crate::resume::store::{KeyValueStore, MemoryStore, RedisStore, ResumeRepository};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Persistence backend
    let store: Box<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => {
            info!("Redis store configured");
            Box::new(RedisStore::open(url)?)
        }
        None => {
            warn!("REDIS_URL not set; resume data will not survive a restart");
            Box::new(MemoryStore::default())
        }
    };
    let repo = ResumeRepository::new(store, config.storage_key.clone());
    let resume = Arc::new(ResumeService::load(repo).await);

    // Compile extraction rules once
    let parser = Arc::new(ResumeParser::new(config.max_import_bytes)?);
    info!("Import parser ready (limit {} bytes)", config.max_import_bytes);

    let state = AppState {
        resume,
        parser,
        config: config.clone(),
    };

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
