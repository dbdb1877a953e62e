use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newsroom_api::article::upload::UploadStore;
use newsroom_api::config::Config;
use newsroom_api::llm_client::{LlmClient, LlmConfig};
use newsroom_api::routes::build_router;
use newsroom_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Newsroom API v{}", env!("CARGO_PKG_VERSION"));

    // Ensure the upload staging directory exists before the first request
    let uploads = UploadStore::open(&config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.upload_dir.display()
            )
        })?;
    info!("Staging uploads in {}", uploads.dir().display());

    // Initialize LLM client
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; article requests will fail until it is configured");
    }
    let llm = LlmClient::new(LlmConfig {
        api_key: config.openai_api_key.clone(),
        model: config.openai_model.clone(),
        base_url: config.openai_base_url.clone(),
        timeout: config.generation_timeout,
    })?;
    match config.generation_timeout {
        Some(timeout) => info!(
            "LLM client initialized (model: {}, timeout: {}s)",
            llm.model(),
            timeout.as_secs()
        ),
        None => warn!(
            "LLM client initialized (model: {}) without a request timeout",
            llm.model()
        ),
    }

    // Build app state
    let state = AppState {
        generator: Arc::new(llm),
        uploads,
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
