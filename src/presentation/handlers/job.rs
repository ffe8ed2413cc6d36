use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::domain::JobStatus;
use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub status: JobStatus,
    pub job_id: Option<String>,
    pub error: Option<String>,
    pub submitted_at: Option<String>,
    pub finished_at: Option<String>,
}

pub async fn job_handler(State(state): State<AppState>) -> Json<JobResponse> {
    let record = state.job_slot.snapshot().await;
    Json(JobResponse {
        status: record.status,
        job_id: record.job_id.map(|id| id.to_string()),
        error: record.error,
        submitted_at: record.submitted_at.map(|t| t.to_rfc3339()),
        finished_at: record.finished_at.map(|t| t.to_rfc3339()),
    })
}
