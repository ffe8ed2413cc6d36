use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::application::ports::{MediaFetcher, TranscriptionBackend};

use super::candle_whisper_backend::CandleWhisperBackend;
use super::openai_whisper_backend::OpenAiWhisperBackend;
use super::scaffold_backend::ScaffoldBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
    Scaffold,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub provider: TranscriptionProvider,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_override: Option<String>,
    pub scaffold_delay: Duration,
}

pub struct TranscriptionBackendFactory;

impl TranscriptionBackendFactory {
    pub fn create(
        config: &BackendConfig,
        fetcher: Arc<dyn MediaFetcher>,
    ) -> Arc<dyn TranscriptionBackend> {
        tracing::info!(provider = ?config.provider, "Creating transcription backend");
        match config.provider {
            TranscriptionProvider::Local => Arc::new(CandleWhisperBackend::new(fetcher)),
            TranscriptionProvider::OpenAi => Arc::new(OpenAiWhisperBackend::new(
                fetcher,
                config.api_key.clone(),
                config.base_url.clone(),
                config.model_override.clone(),
            )),
            TranscriptionProvider::Scaffold => {
                Arc::new(ScaffoldBackend::new(config.scaffold_delay))
            }
        }
    }
}
