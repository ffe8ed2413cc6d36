use std::sync::Arc;

use crate::application::services::JobSlot;

#[derive(Clone)]
pub struct AppState {
    pub job_slot: Arc<JobSlot>,
}

impl AppState {
    pub fn new(job_slot: Arc<JobSlot>) -> Self {
        Self { job_slot }
    }
}
