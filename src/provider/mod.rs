mod constants;
mod models;

pub use models::ModelInfo;

use std::str::FromStr;

use crate::core::CompletionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Groq,
    OpenAI,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Groq => write!(f, "Groq"),
            Provider::OpenAI => write!(f, "OpenAI"),
        }
    }
}

impl FromStr for Provider {
    type Err = CompletionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(Provider::Groq),
            "openai" => Ok(Provider::OpenAI),
            other => Err(CompletionError::Configuration(format!(
                "Unsupported provider '{other}'"
            ))),
        }
    }
}

impl Provider {
    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            Provider::Groq => constants::groq::API_KEY_ENV_VAR,
            Provider::OpenAI => constants::openai::API_KEY_ENV_VAR,
        }
    }

    pub fn api_base(&self) -> &'static str {
        match self {
            Provider::Groq => constants::groq::API_BASE,
            Provider::OpenAI => constants::openai::API_BASE,
        }
    }

    pub fn chat_completions_endpoint(&self) -> &'static str {
        match self {
            Provider::Groq => constants::groq::CHAT_COMPLETIONS_ENDPOINT,
            Provider::OpenAI => constants::openai::CHAT_COMPLETIONS_ENDPOINT,
        }
    }

    /// Model used when a call does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Groq => constants::groq::DEFAULT_MODEL,
            Provider::OpenAI => constants::openai::DEFAULT_MODEL,
        }
    }

    /// Fixed, ordered catalog of models offered for selection.
    pub fn models(&self) -> &'static [ModelInfo] {
        match self {
            Provider::Groq => models::GROQ_MODELS,
            Provider::OpenAI => models::OPENAI_MODELS,
        }
    }
}

/// Where the credential for a provider comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read the provider's default environment variable
    Default,
    Custom(String),
}

impl ApiKey {
    pub fn resolve(&self, provider: Provider) -> Result<String, CompletionError> {
        match self {
            ApiKey::Default => {
                let var = provider.default_api_key_env_var();
                std::env::var(var)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| CompletionError::Configuration(format!("{var} not set.")))
            }
            ApiKey::Custom(key) if key.trim().is_empty() => Err(CompletionError::Configuration(
                "API key must not be empty".to_string(),
            )),
            ApiKey::Custom(key) => Ok(key.clone()),
        }
    }
}
