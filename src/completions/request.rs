//! Wire shapes of the chat-completions API.
//!
//! Only the fields the client reads are modelled on the response side; every
//! one of them is optional so that sparse payloads from compatible services
//! still decode.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{
    ChatRole, Completion, CompletionOptions, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_P, FinishReason, LanguageModelUsage, Message,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,

    pub messages: Vec<ChatMessage>,

    pub temperature: f32,

    pub max_tokens: u32,

    /// Alter this or temperature but not both.
    pub top_p: f32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

impl ChatRequest {
    /// Build a request, filling every option the caller left unset.
    pub fn new(messages: &[Message], options: &CompletionOptions, default_model: &str) -> Self {
        Self {
            model: options
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            messages: messages.iter().map(ChatMessage::from).collect(),
            temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            top_p: options.top_p.unwrap_or(DEFAULT_TOP_P),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub choices: Vec<Choice>,

    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,

    #[serde(default)]
    pub message: Option<ChoiceMessage>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,

    /// `null` when the model produced no text (e.g. only tool calls)
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,

    #[serde(default)]
    pub completion_tokens: u32,

    #[serde(default)]
    pub total_tokens: u32,
}

/// Treats an explicit `null` list like an absent one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatResponse {
    /// Content of the first choice, or an empty string when there is none.
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .unwrap_or_default()
    }

    pub(crate) fn into_completion(self, requested_model: &str, attempts: u32) -> Completion {
        let text = self.first_content().to_string();
        let finish_reason =
            FinishReason::from(self.choices.first().and_then(|c| c.finish_reason.as_deref()));

        Completion {
            text,
            model: self.model.unwrap_or_else(|| requested_model.to_string()),
            finish_reason,
            usage: self.usage.map(|usage| LanguageModelUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
            attempts,
        }
    }
}
