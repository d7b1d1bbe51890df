//! Report service - Consultation PDF generation

use std::{fmt, sync::Arc};

use chrono::Utc;
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::DocumentPort};

/// Produces consultation reports from a question/answer pair
pub struct ReportService {
    composer: Arc<dyn DocumentPort>,
}

impl fmt::Debug for ReportService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportService").finish_non_exhaustive()
    }
}

impl ReportService {
    /// Create a new report service
    pub fn new(composer: Arc<dyn DocumentPort>) -> Self {
        Self { composer }
    }

    /// Render a consultation stamped with the current time
    #[instrument(skip(self, question, answer))]
    pub fn consultation_pdf(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Vec<u8>, ApplicationError> {
        let bytes = self
            .composer
            .render_consultation(question, answer, Utc::now())?;

        debug!(size = bytes.len(), "Consultation report rendered");
        Ok(bytes)
    }
}
