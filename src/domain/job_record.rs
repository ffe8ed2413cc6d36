use chrono::{DateTime, Utc};

use super::{JobId, JobStatus, Transcript};

/// State of the single job slot.
///
/// Transitions go through the methods below so the status and the
/// result/error fields never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub status: JobStatus,
    pub job_id: Option<JobId>,
    pub result: Option<Transcript>,
    pub error: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    pub fn new() -> Self {
        Self {
            status: JobStatus::Idle,
            job_id: None,
            result: None,
            error: None,
            submitted_at: None,
            finished_at: None,
        }
    }

    /// Starts a new job, discarding whatever the previous one produced.
    pub fn begin(&mut self, job_id: JobId) {
        self.status = JobStatus::Processing;
        self.job_id = Some(job_id);
        self.result = None;
        self.error = None;
        self.submitted_at = Some(Utc::now());
        self.finished_at = None;
    }

    /// Records the outcome of `job_id`. The slot keeps no history, so the
    /// last job to finish owns the record even if a newer one is running.
    pub fn complete(&mut self, job_id: JobId, transcript: Transcript) {
        self.job_id = Some(job_id);
        self.result = Some(transcript);
        self.error = None;
        self.status = JobStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    pub fn fail(&mut self, job_id: JobId, error: impl Into<String>) {
        self.job_id = Some(job_id);
        self.result = None;
        self.error = Some(error.into());
        self.status = JobStatus::Failed;
        self.finished_at = Some(Utc::now());
    }

    pub fn is_processing(&self) -> bool {
        self.status == JobStatus::Processing
    }
}

impl Default for JobRecord {
    fn default() -> Self {
        Self::new()
    }
}
