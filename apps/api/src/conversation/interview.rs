//! One interview step: ask the model for the next question, or learn that the
//! interview is over.

use tracing::info;

use crate::conversation::prompts::{interview_system_prompt, COMPLETION_MARKER, OPENING_MESSAGE};
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::models::conversation::{ChatMessage, ConversationResponse};
use crate::models::message::MessageType;

pub async fn next_question(
    llm: &dyn ChatModel,
    message_type: &str,
    history: &[ChatMessage],
    user_answer: Option<&str>,
) -> Result<ConversationResponse, AppError> {
    let system = interview_system_prompt(MessageType::from_label(message_type));
    let user_message = user_answer
        .filter(|a| !a.is_empty())
        .unwrap_or(OPENING_MESSAGE);

    let reply = llm
        .complete(system, history, user_message)
        .await
        .map_err(|e| AppError::Interview(format!("Interview LLM call failed: {e}")))?;

    let response = parse_reply(&reply);
    if response.is_complete {
        info!(
            "Interview for '{}' complete after {} messages",
            message_type,
            history.len()
        );
    }
    Ok(response)
}

/// Strips the completion marker from a model reply and reports whether it was present.
pub fn parse_reply(reply: &str) -> ConversationResponse {
    ConversationResponse {
        question: reply.replacen(COMPLETION_MARKER, "", 1).trim().to_string(),
        is_complete: reply.contains(COMPLETION_MARKER),
    }
}
