// Prompt constants for draft generation.
// Interview prompts live in conversation::prompts.

/// System prompt shared by all tone variants.
pub const GENERATION_SYSTEM: &str =
    "You are a compassionate writing assistant helping someone express difficult emotions.";

/// Used as the context when the interview produced no answers.
/// Replace `{message_type}` before use.
pub const EMPTY_HISTORY_CONTEXT: &str = "The user wants to write a {message_type} message \
    but didn't provide specific details. Write a heartfelt, general message that feels \
    personal and authentic.";

/// Generation prompt template. Replace `{context}`, `{message_type}`, `{tone}`
/// and `{tone_instruction}` before sending.
pub const GENERATION_PROMPT_TEMPLATE: &str = "Based on this context:

{context}

Write a {message_type} message with a {tone} tone.

{tone_instruction}

Requirements:
- 150-300 words
- Authentic and personal (use details from conversation if available)
- Start with an appropriate greeting
- End with appropriate closing
- Do NOT use placeholder names - use actual details provided

Write the complete message now:";
