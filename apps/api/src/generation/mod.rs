// Draft generation: tone variants, prompt templates, the parallel dispatcher
// and the HTTP handler that puts the admission gates in front of it.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod dispatcher;
pub mod handlers;
pub mod prompts;
pub mod tone;
