use std::time::Duration;

use transcription_api::application::ports::TranscriptionBackend;
use transcription_api::domain::{Device, ModelSize, TranscriptionRequest};
use transcription_api::infrastructure::backend::ScaffoldBackend;

#[tokio::test]
async fn given_scaffold_backend_when_transcribing_then_returns_canned_transcript() {
    let backend = ScaffoldBackend::new(Duration::ZERO);
    let options = TranscriptionRequest::parse(Some("base"), Some("fr"), None, None)
        .unwrap()
        .options;

    let transcript = backend
        .transcribe("https://media.test/a.wav", &options)
        .await
        .unwrap();

    assert!(transcript.text.contains("https://media.test/a.wav"));
    assert_eq!(transcript.language.as_deref(), Some("fr"));
    assert_eq!(transcript.segments.len(), 1);
}

#[tokio::test]
async fn given_scaffold_backend_when_preloading_then_succeeds() {
    let backend = ScaffoldBackend::new(Duration::from_millis(10));
    assert!(backend.preload(ModelSize::LargeV3, Device::Cuda).await.is_ok());
}
