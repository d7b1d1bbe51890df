//! Chat handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message
    pub message: String,
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Assistant reply text
    pub response: String,
    /// When the reply was produced
    pub timestamp: String,
    /// Assistant display name
    pub assistant_name: String,
    /// Whether the frontend should offer email/PDF delivery
    pub ask_for_download: bool,
    /// Whether the email capability is configured
    pub email_available: bool,
}

/// Handle a chat request
///
/// Each request is a fresh session: the reply is produced with no
/// prior history, then the same message is classified to decide
/// whether delivery options should be offered.
#[instrument(skip(state, request), fields(message_len = request.message.len()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".to_string()));
    }

    let turn = state.chat_service.chat(&request.message).await?;
    let ask_for_download = state.classifier.is_on_topic(&request.message).await;

    Ok(Json(ChatResponse {
        response: turn.assistant_reply,
        timestamp: turn.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        assistant_name: state.assistant_name.clone(),
        ask_for_download,
        email_available: state.email_service.is_available(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_deserialize() {
        let json = r#"{"message": "¿Quién es Gandalf?"}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.message, "¿Quién es Gandalf?");
    }

    #[test]
    fn chat_response_serialize() {
        let response = ChatResponse {
            response: "Un Maia.".to_string(),
            timestamp: "2024-05-17 12:30:00".to_string(),
            assistant_name: "Elendur".to_string(),
            ask_for_download: true,
            email_available: false,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"response\":\"Un Maia.\""));
        assert!(json.contains("\"ask_for_download\":true"));
        assert!(json.contains("\"email_available\":false"));
    }

    #[test]
    fn empty_message_is_detected() {
        let request = ChatRequest {
            message: "   ".to_string(),
        };
        assert!(request.message.trim().is_empty());
    }
}
