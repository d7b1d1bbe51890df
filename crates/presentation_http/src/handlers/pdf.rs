//! PDF generation handler

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Fixed download filename
const PDF_FILENAME: &str = "consulta_Elendur.pdf";

/// PDF request body
#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    /// The user's question, reproduced verbatim
    pub question: String,
    /// The assistant's answer, reproduced verbatim
    pub answer: String,
}

/// Generate a consultation PDF and stream it as an attachment
#[instrument(skip(state, request))]
pub async fn generate_pdf(
    State(state): State<AppState>,
    Json(request): Json<PdfRequest>,
) -> Result<Response, ApiError> {
    let bytes = state
        .report_service
        .consultation_pdf(&request.question, &request.answer)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={PDF_FILENAME}"),
            ),
        ],
        bytes,
    )
        .into_response())
}
