use serde::{Deserialize, Serialize};

use crate::generation::tone::Tone;

/// The kind of message the user is writing. Selects interview and tone prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Apology,
    Love,
    Gratitude,
    Boundary,
    Confession,
    Other,
}

impl MessageType {
    /// Maps a wire label to a known type. Unrecognised labels fall back to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "apology" => MessageType::Apology,
            "love" => MessageType::Love,
            "gratitude" => MessageType::Gratitude,
            "boundary" => MessageType::Boundary,
            "confession" => MessageType::Confession,
            _ => MessageType::Other,
        }
    }
}

/// One interview exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub qa_history: Option<Vec<QaPair>>,
}

/// A single generated draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageVersion {
    pub tone: Tone,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub versions: Vec<MessageVersion>,
}
