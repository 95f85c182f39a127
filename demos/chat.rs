use dotenv::dotenv;
use greatwork::{CompletionOptions, Message, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // GREATWORK_PROVIDER picks groq (default) or openai; the matching *_API_KEY is used.
    let client = Settings::from_env()?.build_client()?;

    if !client.is_configured() {
        println!("No API key found, set GROQ_API_KEY or OPENAI_API_KEY to chat.");
        return Ok(());
    }

    println!("Models offered by {}:", client.provider());
    for model in client.list_available_models() {
        println!("  {:<32} {}", model.id, model.description);
    }

    let text = client
        .complete(
            &[
                Message::system("You are a concise, upbeat assistant."),
                Message::user("Summarize the idea of the philosopher's stone in one sentence."),
            ],
            &CompletionOptions::default(),
        )
        .await?;

    println!("\nAssistant:\n{text}");

    Ok(())
}
