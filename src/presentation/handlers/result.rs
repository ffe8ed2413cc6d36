use axum::Json;
use axum::extract::State;

use crate::domain::Transcript;
use crate::presentation::state::AppState;

/// Returns `null` until the current job completes.
pub async fn get_result_handler(State(state): State<AppState>) -> Json<Option<Transcript>> {
    Json(state.job_slot.result().await)
}
