//! SMTP email adapter - Implements EmailPort using integration_smtp

use application::ports::{EmailError, EmailPort, OutgoingEmail};
use async_trait::async_trait;
use integration_smtp::{OutboundMessage, SmtpConfig, SmtpError, SmtpMailer};
use tracing::{debug, instrument};

use crate::config::EmailSettings;

/// Adapter dispatching application emails over SMTP
#[derive(Debug)]
pub struct SmtpEmailAdapter {
    mailer: SmtpMailer,
}

impl SmtpEmailAdapter {
    /// Create an adapter from the startup email settings
    ///
    /// `sender_name` is the display name placed in the From header.
    pub fn new(settings: &EmailSettings, sender_name: impl Into<String>) -> Self {
        let config = SmtpConfig::new(
            &settings.smtp_host,
            settings.smtp_port,
            &settings.sender,
            &settings.password,
        )
        .with_sender_name(sender_name);

        Self {
            mailer: SmtpMailer::new(config),
        }
    }

    /// Map SMTP errors to email port errors
    fn map_error(e: SmtpError) -> EmailError {
        match e {
            SmtpError::ConnectionFailed(_) => EmailError::ServiceUnavailable,
            SmtpError::AuthenticationFailed => EmailError::AuthenticationFailed,
            SmtpError::InvalidAddress(addr) => EmailError::InvalidAddress(addr),
            SmtpError::Protocol(msg) => EmailError::OperationFailed(msg),
        }
    }
}

#[async_trait]
impl EmailPort for SmtpEmailAdapter {
    #[instrument(skip(self, email), fields(to = %email.to))]
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let message = OutboundMessage::new(email.to.as_str(), &email.subject, &email.body);

        let message_id = self.mailer.send(&message).await.map_err(Self::map_error)?;

        debug!(message_id = %message_id, "Email dispatched via SMTP");
        Ok(())
    }
}
