//! Application services

mod chat_service;
mod email_service;
mod relevance;
mod report_service;

pub use chat_service::ChatService;
pub use email_service::EmailService;
pub use relevance::RelevanceClassifier;
pub use report_service::ReportService;
