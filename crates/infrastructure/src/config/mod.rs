//! Application configuration
//!
//! Read once at startup from the process environment and handed to
//! every component as an immutable value; nothing re-reads the
//! environment afterwards. Missing model credentials are fatal;
//! missing email settings merely switch the email capability off.

mod server;

use ai_core::GeminiConfig;
use domain::Persona;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

pub use server::ServerConfig;

/// Default SMTP submission port
const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent — startup must abort
    #[error("Missing required configuration: {0}")]
    MissingRequired(&'static str),

    /// The environment could not be read into settings
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Raw settings as they appear in the environment
///
/// Field names match the environment variables (lowercased). Tests
/// build this struct directly instead of mutating the process
/// environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvSettings {
    pub gemini_api_key: Option<String>,
    pub ia_generative_model: Option<String>,
    pub email_address: Option<String>,
    pub email_password: Option<String>,
    pub smtp_server: Option<String>,
    pub smtp_port: Option<u16>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// SMTP delivery settings, present only when fully configured
#[derive(Debug, Clone)]
pub struct EmailSettings {
    /// Sender address (also the AUTH identity)
    pub sender: String,
    /// Sender credential
    pub password: String,
    /// Submission server host
    pub smtp_host: String,
    /// Submission port
    pub smtp_port: u16,
}

/// Immutable application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Model gateway settings, persona attached
    pub inference: GeminiConfig,
    /// Email settings; `None` disables the capability
    pub email: Option<EmailSettings>,
    /// Display name derived from the persona at startup
    pub assistant_name: String,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// `MissingRequired` when the model API key or model identifier is
    /// absent — callers must treat this as fatal and exit.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?
            .try_deserialize::<EnvSettings>()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Self::from_settings(settings)
    }

    /// Build the configuration from already-gathered settings
    pub fn from_settings(settings: EnvSettings) -> Result<Self, ConfigError> {
        let api_key = settings
            .gemini_api_key
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingRequired("GEMINI_API_KEY"))?;
        let model = settings
            .ia_generative_model
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingRequired("IA_GENERATIVE_MODEL"))?;

        let persona = Persona::elendur();
        let assistant_name = persona.display_name();

        let inference =
            GeminiConfig::new(api_key, model).with_system_instruction(persona.instruction());

        let email = match (
            settings.email_address,
            settings.email_password,
            settings.smtp_server,
        ) {
            (Some(sender), Some(password), Some(smtp_host))
                if !sender.is_empty() && !password.is_empty() && !smtp_host.is_empty() =>
            {
                info!("Email delivery is available");
                Some(EmailSettings {
                    sender,
                    password,
                    smtp_host,
                    smtp_port: settings.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
                })
            },
            _ => {
                warn!(
                    "Email settings (EMAIL_ADDRESS, EMAIL_PASSWORD, SMTP_SERVER) are incomplete; \
                     email delivery is disabled"
                );
                None
            },
        };

        let server = ServerConfig {
            host: settings
                .host
                .unwrap_or_else(|| ServerConfig::default().host),
            port: settings.port.unwrap_or_else(|| ServerConfig::default().port),
        };

        Ok(Self {
            server,
            inference,
            email,
            assistant_name,
        })
    }

    /// Whether the email capability is configured
    pub fn email_available(&self) -> bool {
        self.email.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_settings() -> EnvSettings {
        EnvSettings {
            gemini_api_key: Some("key".to_string()),
            ia_generative_model: Some("gemini-pro".to_string()),
            email_address: Some("elendur@ejemplo.com".to_string()),
            email_password: Some("secreto".to_string()),
            smtp_server: Some("smtp.ejemplo.com".to_string()),
            smtp_port: None,
            host: None,
            port: None,
        }
    }

    #[test]
    fn complete_settings_enable_email() {
        let config = AppConfig::from_settings(complete_settings()).unwrap();
        assert!(config.email_available());
        let email = config.email.unwrap();
        assert_eq!(email.sender, "elendur@ejemplo.com");
        assert_eq!(email.smtp_port, DEFAULT_SMTP_PORT);
    }

    #[test]
    fn explicit_smtp_port_is_kept() {
        let settings = EnvSettings {
            smtp_port: Some(2525),
            ..complete_settings()
        };
        let config = AppConfig::from_settings(settings).unwrap();
        assert_eq!(config.email.unwrap().smtp_port, 2525);
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let settings = EnvSettings {
            gemini_api_key: None,
            ..complete_settings()
        };
        let err = AppConfig::from_settings(settings).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn empty_api_key_is_fatal() {
        let settings = EnvSettings {
            gemini_api_key: Some(String::new()),
            ..complete_settings()
        };
        assert!(AppConfig::from_settings(settings).is_err());
    }

    #[test]
    fn missing_model_is_fatal() {
        let settings = EnvSettings {
            ia_generative_model: None,
            ..complete_settings()
        };
        let err = AppConfig::from_settings(settings).unwrap_err();
        assert!(err.to_string().contains("IA_GENERATIVE_MODEL"));
    }

    #[test]
    fn any_missing_email_setting_disables_the_capability() {
        for strip in 0..3 {
            let mut settings = complete_settings();
            match strip {
                0 => settings.email_address = None,
                1 => settings.email_password = None,
                _ => settings.smtp_server = None,
            }
            let config = AppConfig::from_settings(settings).unwrap();
            assert!(!config.email_available(), "case {strip}");
        }
    }

    #[test]
    fn missing_email_settings_do_not_prevent_startup() {
        let settings = EnvSettings {
            gemini_api_key: Some("key".to_string()),
            ia_generative_model: Some("gemini-pro".to_string()),
            ..EnvSettings::default()
        };
        let config = AppConfig::from_settings(settings).unwrap();
        assert!(!config.email_available());
        assert_eq!(config.inference.model, "gemini-pro");
    }

    #[test]
    fn persona_is_attached_to_inference_config() {
        let config = AppConfig::from_settings(complete_settings()).unwrap();
        assert!(
            config
                .inference
                .system_instruction
                .as_deref()
                .unwrap()
                .contains("Elendur")
        );
        assert_eq!(config.assistant_name, "Elendur");
    }

    #[test]
    fn server_defaults_apply() {
        let config = AppConfig::from_settings(complete_settings()).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn server_overrides_apply() {
        let settings = EnvSettings {
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
            ..complete_settings()
        };
        let config = AppConfig::from_settings(settings).unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    }
}
