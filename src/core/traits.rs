use async_trait::async_trait;

use crate::completions::request::{ChatRequest, ChatResponse};

use super::error::TransportError;

/// One request/response exchange with a chat-completion service.
///
/// Implementations perform exactly one attempt per call; retrying is the
/// caller's business.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}
