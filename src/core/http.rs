//! reqwest-backed transport for chat-completion services.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::completions::request::{ChatRequest, ChatResponse};

use super::error::{CompletionError, TransportError};
use super::traits::ChatTransport;

/// Callback receiving a raw JSON payload.
pub type Inspector = Arc<dyn Fn(&Value) + Send + Sync>;

/// Hooks observing the raw JSON sent to and received from the service.
#[derive(Clone, Default)]
pub struct InspectorConfig {
    pub request_inspector: Option<Inspector>,
    pub response_inspector: Option<Inspector>,
}

impl fmt::Debug for InspectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectorConfig")
            .field("request_inspector", &self.request_inspector.is_some())
            .field("response_inspector", &self.response_inspector.is_some())
            .finish()
    }
}

impl InspectorConfig {
    pub fn on_request(mut self, inspector: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.request_inspector = Some(Arc::new(inspector));
        self
    }

    pub fn on_response(mut self, inspector: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.response_inspector = Some(Arc::new(inspector));
        self
    }

    fn inspect_request(&self, value: &Value) {
        if let Some(ref inspector) = self.request_inspector {
            inspector(value);
        }
    }

    fn inspect_response(&self, value: &Value) {
        if let Some(ref inspector) = self.response_inspector {
            inspector(value);
        }
    }
}

/// Settings of the underlying HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Limit for a single attempt, backoff waits excluded
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            user_agent: None,
        }
    }
}

/// Transport that POSTs chat requests as JSON with a bearer credential.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    credential: String,
    inspector: Option<InspectorConfig>,
}

impl HttpTransport {
    pub fn new(
        url: impl Into<String>,
        credential: impl Into<String>,
        config: &HttpClientConfig,
        inspector: Option<InspectorConfig>,
    ) -> Result<Self, CompletionError> {
        let default_ua = format!("greatwork/{}", env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| {
                CompletionError::Configuration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self {
            client,
            url: url.into(),
            credential: credential.into(),
            inspector,
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    #[tracing::instrument(
        name = "chat_completion_request",
        skip(self, request),
        fields(url = %self.url, model = %request.model),
        err
    )]
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let body = serde_json::to_value(request)
            .map_err(|e| TransportError::parse("Failed to serialize request", e))?;

        if let Some(ref inspector) = self.inspector {
            inspector.inspect_request(&body);
        }

        let res = self
            .client
            .post(&self.url)
            .bearer_auth(&self.credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::network("Request failed", e))?;

        let status = res.status();

        if !status.is_success() {
            warn!(status = %status, "API returned error status");

            // A truncated error body must not hide the status.
            let response_text = res.text().await.unwrap_or_else(|e| {
                debug!(error = %e, "Failed to read error response body");
                "Unknown error".to_string()
            });

            if let Some(ref inspector) = self.inspector {
                let error_value = serde_json::from_str(&response_text).unwrap_or_else(|_| {
                    serde_json::json!({
                        "error": response_text,
                        "status_code": status.as_u16()
                    })
                });
                inspector.inspect_response(&error_value);
            }

            return Err(TransportError::status(
                status.as_u16(),
                format!("API returned status {status}: {response_text}"),
            ));
        }

        debug!(status = %status, "HTTP request successful");

        let response_text = res
            .text()
            .await
            .map_err(|e| TransportError::network("Failed to read response body", e))?;

        let response_value: Value = serde_json::from_str(&response_text)
            .map_err(|e| TransportError::parse("Failed to parse response as JSON", e))?;

        if let Some(ref inspector) = self.inspector {
            inspector.inspect_response(&response_value);
        }

        serde_json::from_value(response_value)
            .map_err(|e| TransportError::parse("Failed to parse API response", e))
    }
}
