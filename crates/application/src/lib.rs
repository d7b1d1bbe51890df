//! Application layer for Elendur
//!
//! Orchestration services and the ports they depend on. Adapters for
//! the ports live in the infrastructure crate; nothing here performs
//! I/O directly.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::{ChatService, EmailService, RelevanceClassifier, ReportService};
