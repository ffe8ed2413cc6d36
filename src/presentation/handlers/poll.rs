use axum::Json;
use axum::extract::State;

use crate::domain::JobStatus;
use crate::presentation::state::AppState;

pub async fn poll_handler(State(state): State<AppState>) -> Json<JobStatus> {
    Json(state.job_slot.poll().await)
}
