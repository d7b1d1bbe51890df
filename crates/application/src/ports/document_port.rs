//! Document port - Interface for consultation-report rendering

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Document rendering errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Port for rendering a question/answer pair into a document
///
/// `generated_at` is an explicit input so that identical inputs always
/// produce an identical document structure.
pub trait DocumentPort: Send + Sync {
    /// Render the consultation as finished document bytes
    ///
    /// On failure nothing is returned — there is no partial output.
    fn render_consultation(
        &self,
        question: &str,
        answer: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, DocumentError>;
}
