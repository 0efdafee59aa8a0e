//! Request admission — the gate in front of draft generation.
//!
//! Order is fixed and every step short-circuits:
//! rate limit → parse/validate → content safety → dispatch.
//! Nothing here is retried; a rejection is final for that request.

pub mod client_key;
pub mod rate_limiter;
pub mod safety;

use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::errors::{AppError, INVALID_BODY_MESSAGE, MISSING_FIELDS_MESSAGE};
use crate::models::message::{GenerateRequest, QaPair};
use client_key::ClientKey;
use rate_limiter::RateLimiter;
use safety::SafetyFilter;

/// Lifecycle of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionStage {
    Received,
    RateChecked,
    Validated,
    SafetyChecked,
    Dispatched,
    Completed,
    Failed,
}

/// A request that passed every gate and may be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedRequest {
    pub message_type: String,
    pub qa_history: Vec<QaPair>,
}

/// Tracks one request through the admission stages and logs each transition.
pub struct Admission<'a> {
    client_key: &'a ClientKey,
    stage: AdmissionStage,
}

impl<'a> Admission<'a> {
    pub fn new(client_key: &'a ClientKey) -> Self {
        debug!(client = %client_key, "admission: received");
        Self {
            client_key,
            stage: AdmissionStage::Received,
        }
    }

    pub fn stage(&self) -> AdmissionStage {
        self.stage
    }

    pub fn advance(&mut self, next: AdmissionStage) {
        debug!(client = %self.client_key, from = ?self.stage, to = ?next, "admission: advance");
        self.stage = next;
    }

    /// Moves to `Failed`, logging the reason, and hands the error back.
    pub fn fail(&mut self, err: AppError) -> AppError {
        match &err {
            AppError::Llm(_) | AppError::Internal(_) => {
                error!(client = %self.client_key, from = ?self.stage, reason = err.kind(), "admission: failed")
            }
            _ => {
                warn!(client = %self.client_key, from = ?self.stage, reason = err.kind(), "admission: rejected")
            }
        }
        self.stage = AdmissionStage::Failed;
        err
    }

    /// Runs the three gates: rate limit, body validation, content safety.
    /// On success the admission is at `SafetyChecked`.
    pub fn run_gates(
        &mut self,
        limiter: &RateLimiter,
        safety: &SafetyFilter,
        body: &[u8],
        now: Instant,
    ) -> Result<AdmittedRequest, AppError> {
        if !limiter.admit(self.client_key.as_str(), now) {
            return Err(self.fail(AppError::RateLimited));
        }
        self.advance(AdmissionStage::RateChecked);

        let request = match parse_request(body) {
            Ok(request) => request,
            Err(err) => return Err(self.fail(err)),
        };
        self.advance(AdmissionStage::Validated);

        if let Err(reason) = safety.screen(&request.message_type, &request.qa_history) {
            return Err(self.fail(reason.into()));
        }
        self.advance(AdmissionStage::SafetyChecked);

        Ok(request)
    }
}

/// Parses the JSON body and checks required fields. `qaHistory` is optional.
fn parse_request(body: &[u8]) -> Result<AdmittedRequest, AppError> {
    let request: GenerateRequest = serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected malformed generation body: {e}");
        AppError::Validation(INVALID_BODY_MESSAGE.to_string())
    })?;

    let message_type = request
        .message_type
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()))?;

    Ok(AdmittedRequest {
        message_type,
        qa_history: request.qa_history.unwrap_or_default(),
    })
}
