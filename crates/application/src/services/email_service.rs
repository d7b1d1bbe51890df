//! Email service - Capability-gated outbound mail

use std::{fmt, sync::Arc};

use domain::EmailAddress;
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{EmailPort, OutgoingEmail},
};

/// Dispatches delivery emails when the capability is configured
///
/// The capability flag is fixed at construction time: a service built
/// without a mailer stays unavailable for the process lifetime.
pub struct EmailService {
    mailer: Option<Arc<dyn EmailPort>>,
}

impl fmt::Debug for EmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailService")
            .field("available", &self.is_available())
            .finish_non_exhaustive()
    }
}

impl EmailService {
    /// Create a service backed by a mailer
    pub fn new(mailer: Arc<dyn EmailPort>) -> Self {
        Self {
            mailer: Some(mailer),
        }
    }

    /// Create a service with the email capability switched off
    pub fn disabled() -> Self {
        Self { mailer: None }
    }

    /// Whether the email capability is configured
    pub fn is_available(&self) -> bool {
        self.mailer.is_some()
    }

    /// Send a message to `to`
    ///
    /// # Errors
    ///
    /// `EmailUnavailable` when the capability is off; `EmailDelivery`
    /// when the dispatch itself fails. Either way the attempt is over —
    /// there is no retry.
    #[instrument(skip(self, subject, body), fields(to = %to))]
    pub async fn send(
        &self,
        to: &EmailAddress,
        subject: &str,
        body: &str,
    ) -> Result<(), ApplicationError> {
        let Some(mailer) = &self.mailer else {
            warn!("Email send requested but the capability is not configured");
            return Err(ApplicationError::EmailUnavailable);
        };

        let email = OutgoingEmail::new(to.clone(), subject, body);
        mailer.send(&email).await?;

        debug!("Email dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::ports::EmailError;

    mock! {
        pub Mailer {}

        #[async_trait::async_trait]
        impl EmailPort for Mailer {
            async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
        }
    }

    fn recipient() -> EmailAddress {
        EmailAddress::new("lector@ejemplo.com").unwrap()
    }

    #[test]
    fn disabled_service_is_unavailable() {
        assert!(!EmailService::disabled().is_available());
    }

    #[test]
    fn backed_service_is_available() {
        let service = EmailService::new(Arc::new(MockMailer::new()));
        assert!(service.is_available());
    }

    #[tokio::test]
    async fn disabled_service_rejects_sends() {
        let service = EmailService::disabled();
        let result = service.send(&recipient(), "Asunto", "Cuerpo").await;
        assert!(matches!(result, Err(ApplicationError::EmailUnavailable)));
    }

    #[tokio::test]
    async fn successful_send() {
        let mut mock = MockMailer::new();
        mock.expect_send()
            .withf(|email| email.to.as_str() == "lector@ejemplo.com" && email.subject == "Asunto")
            .returning(|_| Ok(()));

        let service = EmailService::new(Arc::new(mock));
        assert!(service.send(&recipient(), "Asunto", "Cuerpo").await.is_ok());
    }

    #[tokio::test]
    async fn failed_send_maps_to_delivery_error() {
        let mut mock = MockMailer::new();
        mock.expect_send()
            .returning(|_| Err(EmailError::OperationFailed("rejected".to_string())));

        let service = EmailService::new(Arc::new(mock));
        let result = service.send(&recipient(), "Asunto", "Cuerpo").await;
        assert!(matches!(result, Err(ApplicationError::EmailDelivery(_))));
    }

    #[test]
    fn debug_shows_availability() {
        let service = EmailService::disabled();
        assert!(format!("{service:?}").contains("available: false"));
    }
}
