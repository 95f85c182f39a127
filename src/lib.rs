//! # greatwork
//!
//! Chat-completion client behind the text tools of The Great Work Suite.
//!
//! A [`CompletionClient`] sends one conversation to a chat-completion service
//! (Groq by default, OpenAI as an alternative) and returns the text of the
//! first choice. Rate-limit responses are retried with exponential backoff;
//! every other failure ends the call with a classified [`CompletionError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use greatwork::{ClientConfig, CompletionClient, CompletionOptions, Message, Provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompletionClient::new(ClientConfig::new(Provider::Groq));
//!     client.configure(std::env::var("GROQ_API_KEY")?)?;
//!
//!     let text = client
//!         .complete(
//!             &[
//!                 Message::system("You are a concise editor."),
//!                 Message::user("Distill: 'The quick brown fox jumps over the lazy dog.'"),
//!             ],
//!             &CompletionOptions::default(),
//!         )
//!         .await?;
//!
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! ## Retry policy
//!
//! | status | outcome |
//! |---|---|
//! | 429 | retried up to `max_retries` times, waiting `base_delay × 2^n` |
//! | 498 | [`CompletionError::CapacityExceeded`], not retried |
//! | 500 | [`CompletionError::ServerError`], not retried |
//! | other | [`CompletionError::Unknown`], not retried |

pub mod completions;
pub mod core;
pub mod provider;
pub mod settings;

pub use completions::{ClientConfig, CompletionClient};
pub use crate::core::{
    ChatRole, ChatTransport, Completion, CompletionError, CompletionOptions, FinishReason,
    HttpClientConfig, InspectorConfig, LanguageModelUsage, Message, RetryConfig, TransportError,
};
pub use provider::{ApiKey, ModelInfo, Provider};
pub use settings::Settings;
