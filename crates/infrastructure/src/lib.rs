//! Infrastructure layer for Elendur
//!
//! Environment-derived configuration plus the adapters that bind the
//! application ports to concrete services: the Gemini gateway, the
//! SMTP mailer and the PDF composer.

pub mod adapters;
pub mod config;
pub mod pdf;

pub use adapters::{GeminiInferenceAdapter, SmtpEmailAdapter};
pub use config::{AppConfig, ConfigError, EmailSettings, EnvSettings, ServerConfig};
pub use pdf::PdfComposer;
