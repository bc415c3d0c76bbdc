pub mod api;
pub mod provider;

pub use provider::{ChatMessage, ChatRole, CompletionOptions, LlmBackend, LlmProvider};
