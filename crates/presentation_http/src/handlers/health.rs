//! Health handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Health response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub email_available: bool,
}

/// Report process health and configured capabilities
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.chat_service.current_model(),
        email_available: state.email_service.is_available(),
    })
}
