//! Axum route handlers for the Generation API.

use axum::{body::Bytes, extract::State, Json};
use tokio::time::Instant;

use crate::admission::client_key::ClientKey;
use crate::admission::{Admission, AdmissionStage};
use crate::errors::AppError;
use crate::generation::dispatcher::generate_versions;
use crate::models::message::GenerateResponse;
use crate::state::AppState;

/// POST /api/generate
///
/// Admission gates (rate limit → validation → content safety) run before any
/// LLM call. The body is read raw so the rate limit is checked before parsing.
pub async fn handle_generate(
    State(state): State<AppState>,
    client_key: ClientKey,
    body: Bytes,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut admission = Admission::new(&client_key);

    let request = admission.run_gates(
        &state.rate_limiter,
        &state.safety,
        &body,
        Instant::now(),
    )?;

    admission.advance(AdmissionStage::Dispatched);
    let versions = generate_versions(
        state.llm.as_ref(),
        state.config.tones,
        &request.message_type,
        &request.qa_history,
    )
    .await
    .map_err(|e| admission.fail(e))?;

    admission.advance(AdmissionStage::Completed);
    Ok(Json(GenerateResponse { versions }))
}
