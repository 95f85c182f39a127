//! The completion client: credential handling, request shaping and the retry
//! policy around a single chat-completion call.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tracing::{debug, info};

use crate::{
    Provider,
    completions::request::ChatRequest,
    core::{
        ChatTransport, Completion, CompletionError, CompletionOptions, HttpClientConfig,
        HttpTransport, InspectorConfig, Message, RetryConfig,
    },
    provider::ModelInfo,
};

/// Explicit configuration of a [`CompletionClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub provider: Provider,
    /// Base URL of the API, without the endpoint path
    pub base_url: String,
    pub http_config: HttpClientConfig,
    pub retry_config: RetryConfig,
    pub inspector: Option<InspectorConfig>,
}

impl ClientConfig {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            base_url: provider.api_base().to_string(),
            http_config: HttpClientConfig::default(),
            retry_config: RetryConfig::default(),
            inspector: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = timeout;
        self
    }

    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    pub fn with_inspector(mut self, inspector: InspectorConfig) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.provider.chat_completions_endpoint()
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Provider::default())
    }
}

/// Single-call request/retry façade over a remote chat-completion service.
///
/// The client starts unconfigured and only talks to the network once a
/// credential has been set with [`configure`](Self::configure). Each call
/// takes a snapshot of the transport at its start, so reconfiguring a shared
/// client never changes the credential of a call already in flight.
pub struct CompletionClient {
    config: ClientConfig,
    transport: RwLock<Option<Arc<dyn ChatTransport>>>,
}

impl fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionClient")
            .field("config", &self.config)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl CompletionClient {
    /// Create an unconfigured client.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: RwLock::new(None),
        }
    }

    /// Create a client that is already bound to `transport`.
    pub fn with_transport(config: ClientConfig, transport: impl ChatTransport + 'static) -> Self {
        let transport: Arc<dyn ChatTransport> = Arc::new(transport);
        Self {
            config,
            transport: RwLock::new(Some(transport)),
        }
    }

    /// Store `credential` and bind a new HTTP transport to it.
    ///
    /// A blank credential (empty or whitespace-only) is rejected with
    /// [`CompletionError::Configuration`] and leaves the client as it was.
    pub fn configure(&self, credential: impl Into<String>) -> Result<(), CompletionError> {
        let credential = credential.into();
        if credential.trim().is_empty() {
            return Err(CompletionError::Configuration(
                "API key must not be empty".to_string(),
            ));
        }

        let transport = HttpTransport::new(
            self.config.endpoint_url(),
            credential,
            &self.config.http_config,
            self.config.inspector.clone(),
        )?;
        let transport: Arc<dyn ChatTransport> = Arc::new(transport);

        *self
            .transport
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(transport);

        info!(provider = %self.config.provider, "Completion client configured");
        Ok(())
    }

    /// Forget the credential. Calls already in flight keep theirs.
    pub fn clear(&self) {
        *self
            .transport
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        debug!(provider = %self.config.provider, "Completion client credential cleared");
    }

    pub fn is_configured(&self) -> bool {
        self.transport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn provider(&self) -> Provider {
        self.config.provider
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Models offered for selection by this client's provider. No I/O.
    pub fn list_available_models(&self) -> &'static [ModelInfo] {
        self.config.provider.models()
    }

    /// Run one completion and return the first choice's text.
    ///
    /// Returns an empty string when the service answers without choices.
    pub async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        self.complete_detailed(messages, options)
            .await
            .map(|completion| completion.text)
    }

    /// Like [`complete`](Self::complete), keeping model, usage and attempt count.
    pub async fn complete_detailed(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<Completion, CompletionError> {
        let Some(transport) = self.snapshot_transport() else {
            debug!(provider = %self.config.provider, "Completion requested before configure");
            return Err(CompletionError::NotConfigured);
        };

        self.complete_with(transport, messages, options).await
    }

    #[tracing::instrument(
        name = "complete",
        skip(self, snapshot, messages, options),
        fields(provider = %self.config.provider, messages = messages.len()),
        err
    )]
    async fn complete_with(
        &self,
        snapshot: Arc<dyn ChatTransport>,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<Completion, CompletionError> {
        if messages.is_empty() {
            return Err(CompletionError::InvalidRequest(
                "Missing messages. Make sure to add at least one message.".to_string(),
            ));
        }

        let request = ChatRequest::new(messages, options, self.config.provider.default_model());
        debug!(model = %request.model, "Sending completion request");

        let transport: &dyn ChatTransport = snapshot.as_ref();
        let request_ref = &request;
        let (response, state) = self
            .config
            .retry_config
            .run(move |_| transport.send(request_ref))
            .await?;

        Ok(response.into_completion(&request.model, state.attempts()))
    }

    /// [`complete`](Self::complete) bounded by a deadline covering every
    /// attempt and backoff wait.
    pub async fn complete_within(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
        timeout: Duration,
    ) -> Result<String, CompletionError> {
        tokio::time::timeout(timeout, self.complete(messages, options))
            .await
            .map_err(|_| CompletionError::Timeout { timeout })?
    }

    fn snapshot_transport(&self) -> Option<Arc<dyn ChatTransport>> {
        self.transport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completions::request::ChatResponse;
    use crate::core::TransportError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::util::SubscriberInitExt;

    struct CountingTransport {
        calls: Arc<AtomicU32>,
        text: &'static str,
    }

    #[async_trait]
    impl ChatTransport for CountingTransport {
        async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = serde_json::json!({
                "model": request.model,
                "choices": [{ "message": { "role": "assistant", "content": self.text } }]
            });
            serde_json::from_value(body).map_err(|e| TransportError::parse("bad fixture", e))
        }
    }

    /// Counts events emitted at ERROR level.
    struct ErrorEvents(Arc<AtomicU32>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn counting(text: &'static str) -> (CountingTransport, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            CountingTransport {
                calls: Arc::clone(&calls),
                text,
            },
            calls,
        )
    }

    #[test]
    fn new_client_is_unconfigured() {
        let client = CompletionClient::new(ClientConfig::default());
        assert!(!client.is_configured());
        assert_eq!(client.provider(), Provider::Groq);
    }

    #[test]
    fn configure_and_clear_toggle_state() {
        let client = CompletionClient::new(ClientConfig::default());

        client.configure("gsk_secret").expect("valid credential");
        assert!(client.is_configured());

        client.clear();
        assert!(!client.is_configured());
    }

    #[test]
    fn blank_credential_is_rejected_and_keeps_state() {
        let client = CompletionClient::new(ClientConfig::default());

        assert!(matches!(
            client.configure(""),
            Err(CompletionError::Configuration(_))
        ));
        assert!(!client.is_configured());

        client.configure("gsk_secret").unwrap();
        assert!(client.configure("   ").is_err());
        assert!(client.is_configured());
    }

    #[test]
    fn debug_output_hides_the_credential() {
        let client = CompletionClient::new(ClientConfig::default());
        client.configure("gsk_very_secret").unwrap();
        assert!(!format!("{client:?}").contains("gsk_very_secret"));
    }

    #[test]
    fn endpoint_url_joins_base_and_path() {
        let config = ClientConfig::new(Provider::OpenAI).with_base_url("http://localhost:8080/v1/");
        assert_eq!(
            config.endpoint_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(
            ClientConfig::default().endpoint_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn model_catalog_follows_provider() {
        let groq = CompletionClient::new(ClientConfig::new(Provider::Groq));
        let openai = CompletionClient::new(ClientConfig::new(Provider::OpenAI));
        assert_eq!(groq.list_available_models(), Provider::Groq.models());
        assert_eq!(openai.list_available_models(), Provider::OpenAI.models());
    }

    #[tokio::test]
    async fn unconfigured_client_fails_before_any_call() {
        let client = CompletionClient::new(ClientConfig::default());

        let result = client
            .complete(&[Message::user("hi")], &CompletionOptions::default())
            .await;

        assert!(matches!(result, Err(CompletionError::NotConfigured)));
    }

    #[tokio::test]
    async fn empty_conversation_is_rejected_without_io() {
        let (transport, calls) = counting("unused");
        let client = CompletionClient::with_transport(ClientConfig::default(), transport);

        let result = client.complete(&[], &CompletionOptions::default()).await;

        assert!(matches!(result, Err(CompletionError::InvalidRequest(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn detailed_completion_uses_default_model() {
        let (transport, calls) = counting("hello there");
        let client = CompletionClient::with_transport(ClientConfig::default(), transport);

        let completion = client
            .complete_detailed(&[Message::user("hi")], &CompletionOptions::default())
            .await
            .expect("completion");

        assert_eq!(completion.text, "hello there");
        assert_eq!(completion.model, "llama-3.3-70b-versatile");
        assert_eq!(completion.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cleared_client_stops_calling_out() {
        let (transport, calls) = counting("hello");
        let client = CompletionClient::with_transport(ClientConfig::default(), transport);
        client.clear();

        let result = client
            .complete(&[Message::user("hi")], &CompletionOptions::default())
            .await;

        assert!(matches!(result, Err(CompletionError::NotConfigured)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unconfigured_calls_are_not_logged_as_errors() {
        let errors = Arc::new(AtomicU32::new(0));
        let _guard = tracing_subscriber::registry()
            .with(ErrorEvents(Arc::clone(&errors)))
            .set_default();

        let client = CompletionClient::new(ClientConfig::default());
        for _ in 0..3 {
            let result = client
                .complete(&[Message::user("hi")], &CompletionOptions::default())
                .await;
            assert!(matches!(result, Err(CompletionError::NotConfigured)));
        }
        assert_eq!(errors.load(Ordering::SeqCst), 0);

        // A failed call on a configured client is still reported.
        let (transport, _) = counting("unused");
        let configured = CompletionClient::with_transport(ClientConfig::default(), transport);
        let result = configured.complete(&[], &CompletionOptions::default()).await;
        assert!(matches!(result, Err(CompletionError::InvalidRequest(_))));
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }
}
