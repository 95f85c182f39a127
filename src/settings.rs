//! Explicit settings feeding the completion client.
//!
//! Settings are a plain value: read them once (usually from the environment)
//! and hand them to [`Settings::build_client`]. Nothing here is global.

use std::fmt;

use tracing::info;

use crate::{
    Provider,
    completions::{ClientConfig, CompletionClient},
    core::CompletionError,
};

/// Environment variable selecting the active provider (`groq` or `openai`).
pub const PROVIDER_ENV_VAR: &str = "GREATWORK_PROVIDER";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub provider: Provider,
    pub groq_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("provider", &self.provider)
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CompletionError> {
        let provider = match lookup(PROVIDER_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            Some(value) => value.parse()?,
            None => Provider::default(),
        };

        Ok(Self {
            provider,
            groq_api_key: lookup(Provider::Groq.default_api_key_env_var()),
            openai_api_key: lookup(Provider::OpenAI.default_api_key_env_var()),
        })
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_api_key(mut self, provider: Provider, api_key: impl Into<String>) -> Self {
        let api_key = Some(api_key.into());
        match provider {
            Provider::Groq => self.groq_api_key = api_key,
            Provider::OpenAI => self.openai_api_key = api_key,
        }
        self
    }

    /// Non-blank credential stored for `provider`.
    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Groq => self.groq_api_key.as_deref(),
            Provider::OpenAI => self.openai_api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }

    pub fn has_any_api_key(&self) -> bool {
        [Provider::Groq, Provider::OpenAI]
            .into_iter()
            .any(|provider| self.api_key(provider).is_some())
    }

    /// Client for the selected provider with default transport settings.
    pub fn build_client(&self) -> Result<CompletionClient, CompletionError> {
        self.build_client_with(ClientConfig::new(self.provider))
    }

    /// Client for `config.provider`, configured when a credential is stored for it.
    ///
    /// Missing credentials are not an error: the client comes back
    /// unconfigured and every completion call reports `NotConfigured`.
    pub fn build_client_with(
        &self,
        config: ClientConfig,
    ) -> Result<CompletionClient, CompletionError> {
        let provider = config.provider;
        let client = CompletionClient::new(config);

        match self.api_key(provider) {
            Some(key) => client.configure(key)?,
            None if !self.has_any_api_key() => {
                info!("No API key set for Groq or OpenAI, completions are disabled");
            }
            None => {
                info!(%provider, "No API key set for the selected provider, completions are disabled");
            }
        }

        Ok(client)
    }
}
