use serde::{Deserialize, Serialize};

/// Sampling temperature applied when the caller does not pick one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Output token ceiling applied when the caller does not pick one.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
/// Nucleus-sampling mass applied when the caller does not pick one.
pub const DEFAULT_TOP_P: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call overrides for text generation.
///
/// Every field left as `None` falls back to a documented default when the
/// request is built: the provider's default model, temperature
/// [`DEFAULT_TEMPERATURE`], [`DEFAULT_MAX_TOKENS`] output tokens and a
/// nucleus-sampling mass of [`DEFAULT_TOP_P`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    /// Model identifier, see [`crate::ModelInfo`]
    pub model: Option<String>,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,

    /// Nucleus sampling parameter (0.0 to 1.0)
    pub top_p: Option<f32>,
}

impl CompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }
}

/// Result of a completion call with the metadata the service reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Content of the first choice, empty when the service returned none
    pub text: String,
    pub model: String,
    pub finish_reason: FinishReason,
    pub usage: Option<LanguageModelUsage>,
    /// Attempts the call needed, retries included
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Other(String),
    Unknown,
}

impl From<Option<&str>> for FinishReason {
    fn from(reason: Option<&str>) -> Self {
        match reason {
            Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some("tool_calls") | Some("function_call") => FinishReason::ToolCalls,
            Some(other) => FinishReason::Other(other.to_string()),
            None => FinishReason::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageModelUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
