use async_trait::async_trait;

use crate::domain::{Device, ModelSize, Transcript, TranscriptionOptions};

use super::MediaFetchError;

#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Loads the weights for `model_size` so the first job does not pay for it.
    async fn preload(
        &self,
        model_size: ModelSize,
        device: Device,
    ) -> Result<(), TranscriptionError>;

    async fn transcribe(
        &self,
        source_url: &str,
        options: &TranscriptionOptions,
    ) -> Result<Transcript, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("media download failed: {0}")]
    MediaUnavailable(#[from] MediaFetchError),
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
