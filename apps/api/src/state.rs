use std::sync::Arc;

use crate::admission::rate_limiter::RateLimiter;
use crate::admission::safety::SafetyFilter;
use crate::config::Config;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion backend. `LlmClient` in production.
    pub llm: Arc<dyn ChatModel>,
    /// Process-wide limiter for the generation endpoint, constructed once in `main`.
    pub rate_limiter: Arc<RateLimiter>,
    pub safety: Arc<SafetyFilter>,
    pub config: Config,
}
