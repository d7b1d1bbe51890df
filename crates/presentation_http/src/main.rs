//! Elendur HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::sync::Arc;

use application::{ChatService, EmailService, RelevanceClassifier, ReportService};
use infrastructure::{AppConfig, GeminiInferenceAdapter, PdfComposer, SmtpEmailAdapter};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "presentation_http=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Local development settings, if present
    dotenvy::dotenv().ok();

    info!("Elendur v{} starting...", env!("CARGO_PKG_VERSION"));

    // Missing model credentials abort startup before anything is served
    let config =
        AppConfig::load().map_err(|e| anyhow::anyhow!("Fatal configuration error: {e}"))?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.inference.model,
        assistant = %config.assistant_name,
        email_available = config.email_available(),
        "Configuration loaded"
    );

    // Wire adapters and services
    let inference: Arc<dyn application::ports::InferencePort> = Arc::new(
        GeminiInferenceAdapter::new(config.inference.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize model gateway: {e}"))?,
    );

    let chat_service = Arc::new(ChatService::new(Arc::clone(&inference)));
    let classifier = Arc::new(RelevanceClassifier::new(Arc::clone(&inference)));

    let email_service = Arc::new(config.email.as_ref().map_or_else(EmailService::disabled, |settings| {
        let sender_name = format!("{} (Asistente)", config.assistant_name);
        EmailService::new(Arc::new(SmtpEmailAdapter::new(settings, sender_name)))
    }));

    let report_service = Arc::new(ReportService::new(Arc::new(PdfComposer::new(
        config.assistant_name.clone(),
    ))));

    let state = AppState {
        chat_service,
        classifier,
        email_service,
        report_service,
        assistant_name: config.assistant_name.clone(),
    };

    // Build router with middleware
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
