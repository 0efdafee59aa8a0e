//! Generation dispatcher — fans one admitted request out to three tone
//! variants and joins the results.
//!
//! All-or-nothing: the first failing variant fails the dispatch and no
//! partial set of drafts is returned. Results keep the configured tone order.

use tracing::{error, info};

use crate::errors::AppError;
use crate::generation::prompts::{
    EMPTY_HISTORY_CONTEXT, GENERATION_PROMPT_TEMPLATE, GENERATION_SYSTEM,
};
use crate::generation::tone::Tone;
use crate::llm_client::ChatModel;
use crate::models::message::{MessageType, MessageVersion, QaPair};

/// Generates one draft per tone, concurrently, in `tones` order.
pub async fn generate_versions(
    llm: &dyn ChatModel,
    tones: [Tone; 3],
    message_type: &str,
    qa_history: &[QaPair],
) -> Result<Vec<MessageVersion>, AppError> {
    info!(
        "Generating messages for type '{}' (history length: {})",
        message_type,
        qa_history.len()
    );

    let context = build_context(message_type, qa_history);
    let [first, second, third] = tones;

    let (a, b, c) = tokio::try_join!(
        generate_version(llm, first, message_type, &context),
        generate_version(llm, second, message_type, &context),
        generate_version(llm, third, message_type, &context),
    )?;

    info!("Successfully generated all 3 versions");
    Ok(vec![a, b, c])
}

async fn generate_version(
    llm: &dyn ChatModel,
    tone: Tone,
    message_type: &str,
    context: &str,
) -> Result<MessageVersion, AppError> {
    let prompt = build_generation_prompt(tone, message_type, context);

    let content = llm
        .complete(GENERATION_SYSTEM, &[], &prompt)
        .await
        .map_err(|e| {
            error!("Error generating {tone} version: {e}");
            AppError::Llm(format!("{tone} generation failed: {e}"))
        })?;

    Ok(MessageVersion {
        tone,
        title: tone.title().to_string(),
        content: content.trim().to_string(),
    })
}

/// Renders the interview as `Q:`/`A:` blocks, or a fallback when there is none.
pub fn build_context(message_type: &str, qa_history: &[QaPair]) -> String {
    if qa_history.is_empty() {
        return fill_template(EMPTY_HISTORY_CONTEXT, &[("message_type", message_type)]);
    }

    qa_history
        .iter()
        .map(|qa| format!("Q: {}\nA: {}", qa.question, qa.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Fills the generation template. Substituted values are never rescanned, so
/// braces in the message type or the interview answers stay literal.
pub fn build_generation_prompt(tone: Tone, message_type: &str, context: &str) -> String {
    let instruction = tone.instruction(MessageType::from_label(message_type));

    fill_template(
        GENERATION_PROMPT_TEMPLATE,
        &[
            ("context", context),
            ("message_type", message_type),
            ("tone", tone.as_str()),
            ("tone_instruction", instruction),
        ],
    )
}

/// Replaces each `{key}` in `template` in one left-to-right pass. Unknown
/// placeholders are copied through unchanged.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = values.iter().find(|(key, _)| {
            tail.starts_with(key) && tail[key.len()..].starts_with('}')
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
