//! Content safety filter — a blunt keyword gate in front of generation.
//!
//! Categories are data: a name and a case-insensitive, word-bounded pattern.
//! Any match in any category makes the text unsafe. There are no scores or
//! severities; coarse matches (a bare "gun" or "sex") are intended policy.
//!
//! Matching is ASCII-only: `\b` sees only `[A-Za-z0-9_]` as word characters
//! and case folding never maps a non-ASCII letter onto an ASCII one. So
//! "killé" is blocked (é is not a word character) while a Kelvin sign
//! standing in for "K" is not folded into "kill".

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::models::message::QaPair;

/// Default blocked categories, checked in order.
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    (
        "violence",
        r"kill|murder|suicide|self.?harm|hurt (myself|yourself|someone)",
    ),
    ("explicit", r"porn|sex(ual)?|nude|naked|explicit"),
    ("hate", r"hate|racist|racism|slur|n.?word"),
    ("threat", r"threat|threaten|bomb|weapon|gun|shoot"),
];

const BLOCKED_REASON: &str = "Content matches a blocked category.";

/// Result of classifying one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyVerdict {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl SafetyVerdict {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn blocked() -> Self {
        Self {
            allowed: false,
            reason: Some(BLOCKED_REASON.to_string()),
        }
    }
}

/// Which part of a generation request tripped the filter.
/// The display text is returned to the client verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnsafeContent {
    #[error("Message type contains inappropriate content.")]
    MessageType,

    #[error(
        "Your response contains content we're unable to process. Please keep messages respectful and safe."
    )]
    Answer,
}

struct SafetyCategory {
    name: String,
    pattern: Regex,
}

pub struct SafetyFilter {
    categories: Vec<SafetyCategory>,
}

impl SafetyFilter {
    /// Compiles `(name, pattern)` pairs. Each pattern is wrapped in ASCII
    /// word boundaries and matched ASCII-case-insensitively.
    pub fn new<'a, I>(categories: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let categories = categories
            .into_iter()
            .map(|(name, pattern)| {
                Ok(SafetyCategory {
                    name: name.to_string(),
                    pattern: Regex::new(&format!(
                        r"(?i-u)\b(?:{})\b",
                        ascii_pattern(pattern)
                    ))?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { categories })
    }

    pub fn with_default_categories() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_CATEGORIES.iter().copied())
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn classify(&self, text: &str) -> SafetyVerdict {
        match self.categories.iter().find(|c| c.pattern.is_match(text)) {
            Some(category) => {
                debug!(category = %category.name, "Safety filter matched");
                SafetyVerdict::blocked()
            }
            None => SafetyVerdict::allowed(),
        }
    }

    /// Screens a generation request: the message type first, then each
    /// answer in order. Stops at the first violation. Empty answers are skipped.
    pub fn screen(&self, message_type: &str, qa_history: &[QaPair]) -> Result<(), UnsafeContent> {
        if !self.classify(message_type).allowed {
            return Err(UnsafeContent::MessageType);
        }

        let answer_blocked = qa_history
            .iter()
            .filter(|qa| !qa.answer.is_empty())
            .any(|qa| !self.classify(&qa.answer).allowed);

        if answer_blocked {
            return Err(UnsafeContent::Answer);
        }
        Ok(())
    }
}

/// Prepares a category pattern for ASCII mode. A bare `.` would match single
/// bytes there, so it is rewritten to one character other than a line
/// terminator. Escapes and bracket classes pass through unchanged.
fn ascii_pattern(pattern: &str) -> String {
    const ANY_CHAR: &str = r"(?u:[^\n\r\x{2028}\x{2029}])";

    let mut out = String::with_capacity(pattern.len());
    let mut class_depth = 0usize;
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => {
                class_depth += 1;
                out.push(c);
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                out.push(c);
            }
            '.' if class_depth == 0 => out.push_str(ANY_CHAR),
            _ => out.push(c),
        }
    }
    out
}
