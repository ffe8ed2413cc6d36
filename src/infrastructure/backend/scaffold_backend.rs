use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{TranscriptionBackend, TranscriptionError};
use crate::domain::{Device, ModelSize, Transcript, TranscriptSegment, TranscriptionOptions};

/// Canned backend for local runs without model weights.
pub struct ScaffoldBackend {
    delay: Duration,
}

impl ScaffoldBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl TranscriptionBackend for ScaffoldBackend {
    async fn preload(
        &self,
        _model_size: ModelSize,
        _device: Device,
    ) -> Result<(), TranscriptionError> {
        Ok(())
    }

    async fn transcribe(
        &self,
        source_url: &str,
        options: &TranscriptionOptions,
    ) -> Result<Transcript, TranscriptionError> {
        tokio::time::sleep(self.delay).await;

        let segment = TranscriptSegment {
            start: 0.0,
            end: self.delay.as_secs_f64(),
            text: format!(
                "Scaffold transcript of {} ({})",
                source_url, options.model_size
            ),
        };
        Ok(Transcript::from_segments(
            vec![segment],
            Some(options.language.code().unwrap_or("en").to_string()),
        ))
    }
}
