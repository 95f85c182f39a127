use std::time::Duration;

use dotenv::dotenv;
use greatwork::{
    ApiKey, ClientConfig, CompletionClient, CompletionError, CompletionOptions, Message, Provider,
    RetryConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Rate limits are retried up to 5 times, waiting 2s, 4s, 8s, 16s, 32s.
    // Each attempt on its own may take at most 20 seconds.
    let config = ClientConfig::new(Provider::Groq)
        .with_retry_config(RetryConfig::new(5, Duration::from_secs(2)))
        .with_timeout(Duration::from_secs(20));

    let client = CompletionClient::new(config);
    client.configure(ApiKey::Default.resolve(Provider::Groq)?)?;

    let messages = [Message::user("Give me a one-line motto for a writing tool.")];
    let options = CompletionOptions::new().model("llama-3.1-8b-instant");

    // The whole call, waits included, must finish within a minute.
    match client
        .complete_within(&messages, &options, Duration::from_secs(60))
        .await
    {
        Ok(text) => println!("Motto: {text}"),
        Err(CompletionError::RateLimited(e)) => println!("Still rate limited: {e}"),
        Err(e @ CompletionError::CapacityExceeded { .. }) => println!("{e}"),
        Err(e @ CompletionError::ServerError { .. }) => println!("{e}"),
        Err(CompletionError::Timeout { timeout }) => println!("Gave up after {timeout:?}"),
        Err(e) => println!("Error: {e}"),
    }

    Ok(())
}
