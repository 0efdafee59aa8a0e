//! Axum route handlers for the interview API.

use axum::{body::Bytes, extract::State, Json};
use tracing::debug;

use crate::conversation::interview::next_question;
use crate::errors::{AppError, INVALID_BODY_MESSAGE};
use crate::models::conversation::{ConversationRequest, ConversationResponse};
use crate::state::AppState;

/// POST /api/conversation
///
/// Returns the next interview question, and whether the interview is complete.
pub async fn handle_conversation(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ConversationResponse>, AppError> {
    let request: ConversationRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejected malformed conversation body: {e}");
        AppError::Validation(INVALID_BODY_MESSAGE.to_string())
    })?;

    let message_type = request
        .message_type
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing message type".to_string()))?;
    let history = request.conversation_history.unwrap_or_default();

    let response = next_question(
        state.llm.as_ref(),
        &message_type,
        &history,
        request.user_answer.as_deref(),
    )
    .await?;

    Ok(Json(response))
}
