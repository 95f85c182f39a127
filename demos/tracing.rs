/// Shows the spans and events the client emits.
///
/// Run with: RUST_LOG=greatwork=debug cargo run --example tracing
use dotenv::dotenv;
use greatwork::{CompletionOptions, InspectorConfig, Message, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("greatwork=debug")),
        )
        .init();

    let settings = Settings::from_env()?;
    let inspector = InspectorConfig::default()
        .on_request(|req| tracing::info!(request = %req, "outgoing payload"))
        .on_response(|res| tracing::info!(response = %res, "incoming payload"));

    let config = greatwork::ClientConfig::new(settings.provider).with_inspector(inspector);
    let client = settings.build_client_with(config)?;

    let result = client
        .complete_detailed(
            &[Message::user("Name three classical elements.")],
            &CompletionOptions::default().max_tokens(64),
        )
        .await;

    match result {
        Ok(completion) => {
            tracing::info!(
                attempts = completion.attempts,
                model = %completion.model,
                "completion finished"
            );
            println!("{}", completion.text);
        }
        Err(e) => tracing::error!(error = %e, "completion failed"),
    }

    Ok(())
}
