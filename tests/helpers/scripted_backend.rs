use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use transcription_api::application::ports::{TranscriptionBackend, TranscriptionError};
use transcription_api::domain::{
    Device, ModelSize, Transcript, TranscriptSegment, TranscriptionOptions,
};

pub enum Script {
    Succeed(Transcript),
    Fail(String),
    Panic,
}

/// Backend double whose outcome is fixed up front. With a gate, every
/// transcription blocks until the test releases a permit.
pub struct ScriptedBackend {
    script: Script,
    gate: Option<Arc<Semaphore>>,
    fail_preload_on: Option<ModelSize>,
    calls: AtomicUsize,
    preloaded: Mutex<Vec<(ModelSize, Device)>>,
    seen_urls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            gate: None,
            fail_preload_on: None,
            calls: AtomicUsize::new(0),
            preloaded: Mutex::new(Vec::new()),
            seen_urls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Script::Succeed(sample_transcript()))
    }

    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn failing_preload_on(mut self, model: ModelSize) -> Self {
        self.fail_preload_on = Some(model);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn preloaded(&self) -> Vec<(ModelSize, Device)> {
        self.preloaded.lock().unwrap().clone()
    }

    pub fn seen_urls(&self) -> Vec<String> {
        self.seen_urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptionBackend for ScriptedBackend {
    async fn preload(
        &self,
        model_size: ModelSize,
        device: Device,
    ) -> Result<(), TranscriptionError> {
        if self.fail_preload_on == Some(model_size) {
            return Err(TranscriptionError::ModelLoadFailed(format!(
                "no weights for {}",
                model_size
            )));
        }
        self.preloaded.lock().unwrap().push((model_size, device));
        Ok(())
    }

    async fn transcribe(
        &self,
        source_url: &str,
        _options: &TranscriptionOptions,
    ) -> Result<Transcript, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_urls.lock().unwrap().push(source_url.to_string());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        match &self.script {
            Script::Succeed(transcript) => Ok(transcript.clone()),
            Script::Fail(message) => Err(TranscriptionError::TranscriptionFailed(message.clone())),
            Script::Panic => panic!("backend exploded"),
        }
    }
}

pub fn sample_transcript() -> Transcript {
    Transcript::from_segments(
        vec![TranscriptSegment {
            start: 0.0,
            end: 2.5,
            text: "hello world".to_string(),
        }],
        Some("en".to_string()),
    )
}
