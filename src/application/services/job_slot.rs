use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::application::ports::TranscriptionBackend;
use crate::domain::{
    JobId, JobRecord, JobStatus, Transcript, TranscriptionRequest, ValidationError,
};

pub const MISSING_SOURCE_MESSAGE: &str = "No file uploaded and no filename provided";

/// What to do with a submission that arrives while a job is processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Start the new job; the running one is not cancelled and the last to
    /// finish owns the record.
    #[default]
    Replace,
    /// Refuse the submission until the running job finishes.
    Reject,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JobSlotPolicy {
    pub conflict: ConflictPolicy,
    pub require_source_url: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a transcription job is already processing")]
    Busy { job_id: Option<JobId> },
}

/// Holds the one job the service runs at a time.
pub struct JobSlot {
    record: Arc<RwLock<JobRecord>>,
    backend: Arc<dyn TranscriptionBackend>,
    policy: JobSlotPolicy,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl JobSlot {
    pub fn new(backend: Arc<dyn TranscriptionBackend>, policy: JobSlotPolicy) -> Self {
        Self {
            record: Arc::new(RwLock::new(JobRecord::new())),
            backend,
            policy,
            in_flight: Mutex::new(None),
        }
    }

    /// Marks the slot as processing and schedules the transcription.
    /// Returns as soon as the background task is spawned.
    pub async fn submit(&self, request: TranscriptionRequest) -> Result<JobId, SubmissionError> {
        if self.policy.require_source_url {
            request.require_source_url()?;
        }

        let mut in_flight = self.in_flight.lock().await;
        let job_id = JobId::new();
        {
            let mut record = self.record.write().await;
            if record.is_processing() && self.policy.conflict == ConflictPolicy::Reject {
                tracing::warn!(running = ?record.job_id, "Rejecting submission, slot busy");
                return Err(SubmissionError::Busy {
                    job_id: record.job_id,
                });
            }
            record.begin(job_id);
        }

        let span = tracing::info_span!(
            "transcription_job",
            job_id = %job_id,
            model_size = %request.options.model_size,
            language = %request.options.language,
            device = %request.options.device,
        );
        let handle = tokio::spawn(
            run_transcription(
                Arc::clone(&self.record),
                Arc::clone(&self.backend),
                job_id,
                request,
            )
            .instrument(span),
        );

        if let Some(previous) = in_flight.replace(handle) {
            if !previous.is_finished() {
                tracing::warn!("Previous job still running; it will race for the slot");
            }
        }

        tracing::info!(job_id = %job_id, "Transcription job submitted");
        Ok(job_id)
    }

    pub async fn poll(&self) -> JobStatus {
        self.record.read().await.status
    }

    pub async fn result(&self) -> Option<Transcript> {
        self.record.read().await.result.clone()
    }

    pub async fn snapshot(&self) -> JobRecord {
        self.record.read().await.clone()
    }

    /// Waits for the most recently submitted job to finish.
    pub async fn wait_for_current(&self) {
        let handle = self.in_flight.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Job task ended abnormally");
            }
        }
    }
}

async fn run_transcription(
    record: Arc<RwLock<JobRecord>>,
    backend: Arc<dyn TranscriptionBackend>,
    job_id: JobId,
    request: TranscriptionRequest,
) {
    let outcome = match request.source_url {
        Some(url) => {
            tracing::info!(source_url = %url, "Transcribing from url");
            let options = request.options;
            // Run the backend in its own task so a panic lands in the JoinError.
            let task = tokio::spawn(
                async move { backend.transcribe(&url, &options).await }.in_current_span(),
            );
            match task.await {
                Ok(Ok(transcript)) => Ok(transcript),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(format!("transcription task aborted: {}", e)),
            }
        }
        None => Err(MISSING_SOURCE_MESSAGE.to_string()),
    };

    let mut record = record.write().await;
    if record.job_id != Some(job_id) {
        tracing::warn!(
            current = ?record.job_id,
            "Superseded job finished after a newer submission"
        );
    }

    match outcome {
        Ok(transcript) => {
            tracing::info!(
                chars = transcript.text.len(),
                segments = transcript.segments.len(),
                "Transcription completed"
            );
            record.complete(job_id, transcript);
        }
        Err(message) => {
            tracing::error!(error = %message, "Transcription failed");
            record.fail(job_id, message);
        }
    }
}
