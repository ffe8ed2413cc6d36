use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{MediaFetcher, TranscriptionBackend, TranscriptionError};
use crate::domain::{Device, ModelSize, Transcript, TranscriptSegment, TranscriptionOptions};

/// Forwards media to an OpenAI-compatible `/audio/transcriptions` endpoint.
pub struct OpenAiWhisperBackend {
    client: reqwest::Client,
    fetcher: Arc<dyn MediaFetcher>,
    api_key: Option<String>,
    base_url: String,
    model_override: Option<String>,
}

#[derive(Deserialize)]
struct VerboseTranscription {
    text: String,
    language: Option<String>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
}

#[derive(Deserialize)]
struct VerboseSegment {
    start: f64,
    end: f64,
    text: String,
}

impl OpenAiWhisperBackend {
    pub fn new(
        fetcher: Arc<dyn MediaFetcher>,
        api_key: Option<String>,
        base_url: Option<String>,
        model_override: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            fetcher,
            api_key,
            base_url: base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model_override,
        }
    }

    fn model_name(&self, size: ModelSize) -> String {
        self.model_override
            .clone()
            .unwrap_or_else(|| size.as_str().to_string())
    }
}

#[async_trait]
impl TranscriptionBackend for OpenAiWhisperBackend {
    async fn preload(
        &self,
        model_size: ModelSize,
        _device: Device,
    ) -> Result<(), TranscriptionError> {
        tracing::debug!(model = %self.model_name(model_size), "Remote backend, nothing to preload");
        Ok(())
    }

    async fn transcribe(
        &self,
        source_url: &str,
        options: &TranscriptionOptions,
    ) -> Result<Transcript, TranscriptionError> {
        let media = self.fetcher.fetch(source_url).await?;
        let file_name = source_url
            .rsplit('/')
            .next()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("media")
            .to_string();

        let model = self.model_name(options.model_size);
        let mut form = multipart::Form::new()
            .text("model", model.clone())
            .text("response_format", "verbose_json")
            .part("file", multipart::Part::bytes(media).file_name(file_name));
        if let Some(code) = options.language.code() {
            form = form.text("language", code);
        }

        tracing::debug!(
            model = %model,
            device = %options.device,
            "Sending media to remote Whisper endpoint"
        );

        let mut request = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let verbose: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        Ok(Transcript {
            text: verbose.text.trim().to_string(),
            language: verbose.language,
            segments: verbose
                .segments
                .into_iter()
                .map(|s| TranscriptSegment {
                    start: s.start,
                    end: s.end,
                    text: s.text.trim().to_string(),
                })
                .collect(),
        })
    }
}
