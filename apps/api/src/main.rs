mod config;
mod errors;
mod fetcher;
mod generation;
mod jobs;
mod llm_client;
mod models;
mod pipeline;
mod recorder;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::fetcher::WebDriverFetcher;
use crate::llm_client::LlmClient;
use crate::pipeline::Orchestrator;
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize page fetcher; a browser session is opened per fetch
    let fetcher = WebDriverFetcher::new(
        config.webdriver_url.clone(),
        Duration::from_millis(config.render_wait_ms),
    );
    info!("Page fetcher targets WebDriver at {}", config.webdriver_url);

    let pipeline = config.pipeline();
    info!(
        "Writing applications to {} (log: {})",
        pipeline.output_root.display(),
        pipeline.tracking_log_path.display()
    );

    let state = AppState::new(Orchestrator::new(
        pipeline,
        Arc::new(fetcher),
        Arc::new(llm),
    ));

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
