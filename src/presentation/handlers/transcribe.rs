use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::domain::TranscriptionRequest;
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TranscribeQuery {
    pub model_size: Option<String>,
    pub language: Option<String>,
    pub device: Option<String>,
    pub uploaded_file_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmittedResponse {
    pub status: &'static str,
    pub job_id: String,
}

#[tracing::instrument(skip(state))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    Query(query): Query<TranscribeQuery>,
) -> Result<Json<SubmittedResponse>, ApiError> {
    let request = TranscriptionRequest::parse(
        query.model_size.as_deref(),
        query.language.as_deref(),
        query.device.as_deref(),
        query.uploaded_file_url.as_deref(),
    )
    .inspect_err(|e| tracing::warn!(error = %e, "Rejected transcription request"))?;

    if request.source_url.is_none() {
        tracing::warn!("Submission without uploaded_file_url");
    }

    let job_id = state.job_slot.submit(request).await?;

    Ok(Json(SubmittedResponse {
        status: "submitted",
        job_id: job_id.to_string(),
    }))
}
