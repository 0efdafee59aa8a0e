use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::generation::tone::Tone;

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Fixed-window limits applied to the generation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
    /// How often expired client entries are swept. `None` disables the sweeper.
    pub sweep_interval: Option<Duration>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window: Duration::from_millis(60_000),
            sweep_interval: Some(Duration::from_secs(300)),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub rate_limit: RateLimitConfig,
    /// The three tone variants generated per request, in response order.
    pub tones: [Tone; 3],
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = RateLimitConfig::default();
        let sweep_secs: u64 = optional_env("RATE_LIMIT_SWEEP_SECS", 300)?;

        let rate_limit = RateLimitConfig {
            max_requests: optional_env("RATE_LIMIT_MAX_REQUESTS", defaults.max_requests)?,
            window: Duration::from_millis(optional_env("RATE_LIMIT_WINDOW_MS", 60_000u64)?),
            sweep_interval: (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs)),
        };
        if rate_limit.max_requests == 0 {
            bail!("RATE_LIMIT_MAX_REQUESTS must be at least 1");
        }
        if rate_limit.window.is_zero() {
            bail!("RATE_LIMIT_WINDOW_MS must be greater than 0");
        }

        let tones = match std::env::var("GENERATION_TONES") {
            Ok(raw) => parse_tones(&raw).context("GENERATION_TONES is invalid")?,
            Err(_) => Tone::ALL,
        };

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string()),
            port: optional_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            rate_limit,
            tones,
        })
    }
}

/// Parses a comma-separated tone list. Exactly three distinct tones are required.
pub fn parse_tones(raw: &str) -> Result<[Tone; 3]> {
    let tones = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Tone>())
        .collect::<Result<Vec<_>, _>>()?;

    let [a, b, c]: [Tone; 3] = tones
        .try_into()
        .map_err(|v: Vec<Tone>| anyhow::anyhow!("expected exactly 3 tones, got {}", v.len()))?;

    if a == b || a == c || b == c {
        bail!("tones must be distinct");
    }
    Ok([a, b, c])
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid value, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
