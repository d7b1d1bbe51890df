//! Elendur CLI
//!
//! Interactive console session with the assistant.

mod repl;

use std::{io, sync::Arc};

use application::{ChatService, EmailService};
use infrastructure::{AppConfig, GeminiInferenceAdapter, SmtpEmailAdapter};
use repl::ReplContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep the console clean unless asked otherwise
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    // Missing model credentials abort before the first prompt
    let config =
        AppConfig::load().map_err(|e| anyhow::anyhow!("Fatal configuration error: {e}"))?;

    let inference: Arc<dyn application::ports::InferencePort> = Arc::new(
        GeminiInferenceAdapter::new(config.inference.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize model gateway: {e}"))?,
    );

    let email_service = config.email.as_ref().map_or_else(EmailService::disabled, |settings| {
        let sender_name = format!("{} (Asistente)", config.assistant_name);
        EmailService::new(Arc::new(SmtpEmailAdapter::new(settings, sender_name)))
    });

    let ctx = ReplContext {
        chat_service: Arc::new(ChatService::new(inference)),
        email_service: Arc::new(email_service),
        assistant_name: config.assistant_name,
    };

    repl::run(&ctx, io::stdin().lock(), io::stdout().lock()).await?;

    Ok(())
}
