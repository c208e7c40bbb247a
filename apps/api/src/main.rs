mod config;
mod errors;
mod jobs;
mod llm_client;
mod main_resume;
mod migrations;
mod models;
mod resumes;
mod routes;
mod state;
mod storage;
mod store;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::cache::RedisViewedJobs;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::S3FileStore;
use crate::store::PgStore;

/// Timeout for page scraping and company research requests.
const OUTBOUND_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobPilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let store = PgStore::connect(&config.database_url).await?;

    // Initialize Redis (connections are opened lazily per cache call)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let viewed_jobs = RedisViewedJobs::new(redis, config.viewed_job_ttl_secs);
    info!(
        "Viewed-jobs cache initialized (ttl: {}s)",
        config.viewed_job_ttl_secs
    );

    // Initialize S3 / MinIO
    let files = S3FileStore::from_config(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize LLM client
    let llm = LlmClient::from_config(&config.llm)?;
    let selected = llm.selected_model().await;
    info!(
        "LLM client initialized (model: {}/{})",
        selected.provider, selected.model
    );

    let http = reqwest::Client::builder()
        .timeout(OUTBOUND_HTTP_TIMEOUT)
        .user_agent(concat!("jobpilot/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build outbound HTTP client")?;

    // Build app state
    let state = AppState {
        store: Arc::new(store),
        viewed_jobs: Arc::new(viewed_jobs),
        files: Arc::new(files),
        llm,
        http,
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
