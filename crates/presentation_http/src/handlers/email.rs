//! Email delivery handler

use axum::{Json, extract::State};
use domain::EmailAddress;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Email request body
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    /// Recipient address
    pub recipient_email: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Email response body
#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    /// Human-readable outcome
    pub message: String,
    /// Always true — failures are reported as error statuses
    pub success: bool,
}

/// Send a conversation reply by email
///
/// The recipient is validated before anything touches the network; a
/// missing email capability is a 503, a failed dispatch a 500.
#[instrument(skip(state, request))]
pub async fn send_email(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let recipient = EmailAddress::new(&request.recipient_email)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if !state.email_service.is_available() {
        return Err(ApiError::ServiceUnavailable(
            "La funcionalidad de envío de correo no está configurada o disponible.".to_string(),
        ));
    }

    state
        .email_service
        .send(&recipient, &request.subject, &request.body)
        .await?;

    Ok(Json(SendEmailResponse {
        message: format!("La información ha sido enviada con éxito a {recipient}."),
        success: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserialize() {
        let json = r#"{
            "recipient_email": "lector@ejemplo.com",
            "subject": "Información de Tolkien",
            "body": "Gandalf es un Maia."
        }"#;
        let request: SendEmailRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.recipient_email, "lector@ejemplo.com");
        assert_eq!(request.subject, "Información de Tolkien");
    }

    #[test]
    fn response_serialize() {
        let response = SendEmailResponse {
            message: "Enviado.".to_string(),
            success: true,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
    }
}
