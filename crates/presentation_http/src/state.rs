//! Application state shared across handlers

use std::sync::Arc;

use application::{ChatService, EmailService, RelevanceClassifier, ReportService};

/// Shared application state
///
/// Built once at startup; everything inside is immutable and shared
/// read-only between concurrent requests.
#[derive(Clone)]
pub struct AppState {
    /// Chat service for conversation handling
    pub chat_service: Arc<ChatService>,
    /// Topical relevance classifier
    pub classifier: Arc<RelevanceClassifier>,
    /// Capability-gated email dispatch
    pub email_service: Arc<EmailService>,
    /// Consultation PDF generation
    pub report_service: Arc<ReportService>,
    /// Assistant display name, derived at startup
    pub assistant_name: String,
}
