//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Web page
        .route("/", get(handlers::index::index))
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Conversation API
        .route("/chat", post(handlers::chat::chat))
        // Delivery API
        .route("/send-email", post(handlers::email::send_email))
        .route("/generate-pdf", post(handlers::pdf::generate_pdf))
        // Attach state
        .with_state(state)
}
