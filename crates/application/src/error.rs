//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::{DocumentError, EmailError};

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// Email capability is not configured
    #[error("Email service unavailable")]
    EmailUnavailable,

    /// Email was accepted for sending but delivery failed
    #[error("Email delivery failed: {0}")]
    EmailDelivery(String),

    /// Document rendering failed
    #[error("Document rendering failed: {0}")]
    Document(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<EmailError> for ApplicationError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::ServiceUnavailable => Self::EmailUnavailable,
            other => Self::EmailDelivery(other.to_string()),
        }
    }
}

impl From<DocumentError> for ApplicationError {
    fn from(err: DocumentError) -> Self {
        Self::Document(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::InvalidEmailAddress("x".to_string()).into();
        assert_eq!(err.to_string(), "Invalid email address: x");
    }

    #[test]
    fn email_unavailable_maps_from_port_error() {
        let err: ApplicationError = EmailError::ServiceUnavailable.into();
        assert!(matches!(err, ApplicationError::EmailUnavailable));
    }

    #[test]
    fn email_failure_maps_to_delivery_error() {
        let err: ApplicationError = EmailError::OperationFailed("rejected".to_string()).into();
        let ApplicationError::EmailDelivery(msg) = err else {
            unreachable!("Expected EmailDelivery");
        };
        assert!(msg.contains("rejected"));
    }

    #[test]
    fn document_error_maps() {
        let err: ApplicationError = DocumentError::RenderFailed("bad glyph".to_string()).into();
        assert!(matches!(err, ApplicationError::Document(_)));
    }
}
