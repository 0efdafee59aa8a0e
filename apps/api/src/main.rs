mod admission;
mod config;
mod conversation;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod test_utils;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::admission::rate_limiter::RateLimiter;
use crate::admission::safety::SafetyFilter;
use crate::config::Config;
use crate::llm_client::LlmClient;
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

    info!("Starting Unspoken API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone(), config.groq_base_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize admission gates
    let rate_limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));
    info!(
        "Rate limit: {} requests per {:?}",
        config.rate_limit.max_requests, config.rate_limit.window
    );
    if let Some(every) = config.rate_limit.sweep_interval {
        Arc::clone(&rate_limiter).spawn_sweeper(every);
    }

    let safety = Arc::new(SafetyFilter::with_default_categories()?);
    info!(
        "Safety filter loaded: [{}]",
        safety.category_names().collect::<Vec<_>>().join(", ")
    );
    info!("Generation tones: {:?}", config.tones);

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        rate_limiter,
        safety,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins to the web client's domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
