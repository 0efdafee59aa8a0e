// Interview orchestration: one model turn per call, stateless on the server.
// The client carries the conversation history between steps.

pub mod handlers;
pub mod interview;
pub mod prompts;
