//! Port adapters

mod gemini_inference;
mod smtp_email;

pub use gemini_inference::GeminiInferenceAdapter;
pub use smtp_email::SmtpEmailAdapter;
