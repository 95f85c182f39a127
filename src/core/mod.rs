pub mod error;
pub mod http;
pub mod retry;
pub mod traits;
pub mod types;

pub use error::{
    BoxError, CompletionError, STATUS_CAPACITY_EXCEEDED, STATUS_RATE_LIMITED,
    STATUS_SERVER_ERROR, TransportError,
};
pub use http::{HttpClientConfig, HttpTransport, Inspector, InspectorConfig};
pub use retry::{FailureClass, RetryConfig, RetryState, backoff_delay};
pub use traits::ChatTransport;
pub use types::{
    ChatRole, Completion, CompletionOptions, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_P, FinishReason, LanguageModelUsage, Message,
};
