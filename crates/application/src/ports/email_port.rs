//! Email port for application layer
//!
//! Outbound-only: this system sends delivery emails, it never reads a
//! mailbox. Implemented by the SMTP adapter in infrastructure.

use async_trait::async_trait;
use domain::EmailAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Email port errors
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service unavailable")]
    ServiceUnavailable,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// A message ready for dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingEmail {
    /// Recipient address
    pub to: EmailAddress,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl OutgoingEmail {
    /// Create a new outgoing email
    pub fn new(to: EmailAddress, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Email port trait
#[async_trait]
pub trait EmailPort: Send + Sync {
    /// Send a single message
    ///
    /// The underlying connection is opened, used and closed within this
    /// call; no state is shared between sends.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
}
