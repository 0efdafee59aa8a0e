//! Shared test fixtures: a scripted chat model and a ready-made `AppState`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::admission::rate_limiter::RateLimiter;
use crate::admission::safety::SafetyFilter;
use crate::config::{Config, RateLimitConfig};
use crate::generation::tone::Tone;
use crate::llm_client::{ChatModel, LlmError};
use crate::models::conversation::ChatMessage;
use crate::state::AppState;

/// A recorded `ChatModel::complete` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub history: Vec<ChatMessage>,
    pub user_message: String,
}

/// Chat model that answers from a closure and records every call.
pub struct ScriptedModel {
    reply: Box<dyn Fn(&str) -> Result<String, LlmError> + Send + Sync>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new<F>(reply: F) -> Self
    where
        F: Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always replies with `text`.
    pub fn fixed(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Replies `"  <tone> draft  "` for generation prompts, naming the tone found in the prompt.
    pub fn echo_tone() -> Self {
        Self::new(|prompt| {
            let tone = Tone::ALL
                .into_iter()
                .find(|t| prompt.contains(&format!("with a {} tone", t.as_str())))
                .map(|t| t.as_str())
                .unwrap_or("unknown");
            Ok(format!("  {tone} draft  "))
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(
        &self,
        system: &str,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            history: history.to_vec(),
            user_message: user_message.to_string(),
        });
        // Yield so concurrent calls interleave like real network calls.
        tokio::time::sleep(Duration::from_millis(1)).await;
        (self.reply)(user_message)
    }
}

pub fn api_error(message: &str) -> LlmError {
    LlmError::Api {
        status: 503,
        message: message.to_string(),
    }
}

pub fn test_config() -> Config {
    Config {
        groq_api_key: "test-key".to_string(),
        groq_base_url: "http://localhost:0".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        rate_limit: RateLimitConfig {
            max_requests: 5,
            window: Duration::from_secs(60),
            sweep_interval: None,
        },
        tones: Tone::ALL,
    }
}

pub fn test_state(llm: Arc<dyn ChatModel>) -> AppState {
    let config = test_config();
    AppState {
        llm,
        rate_limiter: Arc::new(RateLimiter::from_config(&config.rate_limit)),
        safety: Arc::new(SafetyFilter::with_default_categories().unwrap()),
        config,
    }
}
