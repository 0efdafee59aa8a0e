use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::admission::safety::UnsafeContent;

pub const RATE_LIMITED_MESSAGE: &str =
    "Too many requests. Please wait a minute before generating again.";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Rate limited")]
    RateLimited,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsafe content: {0}")]
    UnsafeContent(#[from] UnsafeContent),

    /// A draft generation call failed.
    #[error("LLM error: {0}")]
    Llm(String),

    /// The interview's chat-completion call failed.
    #[error("Interview error: {0}")]
    Interview(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short tag used in logs for the admission `FAILED` transition.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::RateLimited => "rate_limited",
            AppError::Validation(_) => "invalid_request",
            AppError::UnsafeContent(_) => "unsafe_content",
            AppError::Llm(_) => "downstream_generation_failure",
            AppError::Interview(_) => "downstream_interview_failure",
            AppError::Internal(_) => "unexpected_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                RATE_LIMITED_MESSAGE.to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnsafeContent(reason) => {
                (StatusCode::UNPROCESSABLE_ENTITY, reason.to_string())
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate messages".to_string(),
                )
            }
            AppError::Interview(msg) => {
                tracing::error!("Interview error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process conversation".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
