//! Tone variants — the three stylistic renderings generated for every message.
//!
//! Each tone carries a fixed display title and a per-message-type writing
//! instruction. Unknown message types use the `Other` instruction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::message::MessageType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Vulnerable,
    Direct,
    Gentle,
}

#[derive(Debug, Error)]
#[error("unknown tone '{0}' (expected vulnerable, direct or gentle)")]
pub struct UnknownTone(pub String);

impl Tone {
    /// Default tone set, in response order.
    pub const ALL: [Tone; 3] = [Tone::Vulnerable, Tone::Direct, Tone::Gentle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Vulnerable => "vulnerable",
            Tone::Direct => "direct",
            Tone::Gentle => "gentle",
        }
    }

    /// Human-facing label shown above each draft.
    pub fn title(&self) -> &'static str {
        match self {
            Tone::Vulnerable => "Open and Emotional",
            Tone::Direct => "Clear and Sincere",
            Tone::Gentle => "Soft and Thoughtful",
        }
    }

    /// Writing instruction for this tone, calibrated to the message type.
    pub fn instruction(&self, message_type: MessageType) -> &'static str {
        use MessageType::*;
        match (self, message_type) {
            (Tone::Vulnerable, Apology) => {
                "Write in a vulnerable, open, emotionally honest tone.\n\
                 Be raw and authentic. Show feelings clearly. Use \"I feel\" statements.\n\
                 This version should feel like opening your heart completely."
            }
            (Tone::Vulnerable, Love) => {
                "Write in a vulnerable, deeply emotional tone.\n\
                 Express feelings openly and honestly. Show your heart.\n\
                 This version should feel like complete emotional vulnerability."
            }
            (Tone::Vulnerable, Gratitude) => {
                "Write in a warm, emotional, heartfelt tone.\n\
                 Let your appreciation flow freely. Be openly moved.\n\
                 This version should feel deeply touching and sincere."
            }
            (Tone::Vulnerable, Boundary) => {
                "Write in a vulnerable but firm tone.\n\
                 Express your needs clearly while showing your care for them.\n\
                 This version should feel honest about difficulty but clear about limits."
            }
            (Tone::Vulnerable, Confession) => {
                "Write in a vulnerable, honest, open tone.\n\
                 Share your truth with complete authenticity.\n\
                 This version should feel like bearing your soul."
            }
            (Tone::Vulnerable, Other) => {
                "Write in a vulnerable, emotionally open tone.\n\
                 Express yourself with complete honesty and authenticity.\n\
                 This version should feel deeply personal and real."
            }
            (Tone::Direct, Apology) => {
                "Write in a clear, direct, sincere tone.\n\
                 Be straightforward and honest without being cold.\n\
                 State things plainly. Take clear responsibility.\n\
                 This version should feel mature and grounded."
            }
            (Tone::Direct, Love) => {
                "Write in a direct, honest, straightforward tone.\n\
                 Say what you feel clearly and plainly.\n\
                 This version should feel confident and clear."
            }
            (Tone::Direct, Gratitude) => {
                "Write in a clear, sincere, straightforward tone.\n\
                 State your appreciation directly and specifically.\n\
                 This version should feel genuine and matter-of-fact."
            }
            (Tone::Direct, Boundary) => {
                "Write in a direct, clear, firm tone.\n\
                 State your boundary plainly and without apology.\n\
                 This version should feel assertive and clear."
            }
            (Tone::Direct, Confession) => {
                "Write in a direct, honest, clear tone.\n\
                 Share what you need to say straightforwardly.\n\
                 This version should feel brave and clear."
            }
            (Tone::Direct, Other) => {
                "Write in a direct, clear, honest tone.\n\
                 Express yourself straightforwardly and plainly.\n\
                 This version should feel grounded and sincere."
            }
            (Tone::Gentle, Apology) => {
                "Write in a soft, thoughtful, careful tone.\n\
                 Be tender and considerate. Use gentle language.\n\
                 Show deep care for the recipient's feelings.\n\
                 This version should feel like a warm embrace."
            }
            (Tone::Gentle, Love) => {
                "Write in a soft, tender, gentle tone.\n\
                 Express feelings with care and thoughtfulness.\n\
                 This version should feel warm and safe."
            }
            (Tone::Gentle, Gratitude) => {
                "Write in a gentle, warm, thoughtful tone.\n\
                 Express appreciation with tenderness and care.\n\
                 This version should feel like a soft thank you."
            }
            (Tone::Gentle, Boundary) => {
                "Write in a gentle but clear tone.\n\
                 Set your boundary with kindness and care.\n\
                 This version should feel soft but firm."
            }
            (Tone::Gentle, Confession) => {
                "Write in a gentle, careful, thoughtful tone.\n\
                 Share your truth with tenderness.\n\
                 This version should feel safe and kind."
            }
            (Tone::Gentle, Other) => {
                "Write in a gentle, thoughtful, kind tone.\n\
                 Express yourself with care and consideration.\n\
                 This version should feel warm and tender."
            }
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = UnknownTone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vulnerable" => Ok(Tone::Vulnerable),
            "direct" => Ok(Tone::Direct),
            "gentle" => Ok(Tone::Gentle),
            other => Err(UnknownTone(other.to_string())),
        }
    }
}
