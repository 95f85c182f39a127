//! Chat-completion API: wire shapes and the client issuing requests.

pub mod client;
pub mod request;

pub use client::{ClientConfig, CompletionClient};
pub use request::{ChatMessage, ChatRequest, ChatResponse, Choice, ChoiceMessage, Usage};
