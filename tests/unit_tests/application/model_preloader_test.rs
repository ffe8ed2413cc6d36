use transcription_api::application::ports::TranscriptionError;
use transcription_api::application::services::preload_models;
use transcription_api::domain::{Device, ModelSize};

use crate::helpers::ScriptedBackend;

#[tokio::test]
async fn given_model_list_when_preloading_then_loads_each_in_order() {
    let backend = ScriptedBackend::succeeding();

    preload_models(&backend, &[ModelSize::Small, ModelSize::LargeV3], Device::Cpu)
        .await
        .unwrap();

    assert_eq!(
        backend.preloaded(),
        vec![
            (ModelSize::Small, Device::Cpu),
            (ModelSize::LargeV3, Device::Cpu)
        ]
    );
}

#[tokio::test]
async fn given_failing_model_when_preloading_then_stops_at_first_error() {
    let backend = ScriptedBackend::succeeding().failing_preload_on(ModelSize::Base);

    let result = preload_models(
        &backend,
        &[ModelSize::Tiny, ModelSize::Base, ModelSize::Small],
        Device::Cuda,
    )
    .await;

    assert!(matches!(result, Err(TranscriptionError::ModelLoadFailed(_))));
    assert_eq!(backend.preloaded(), vec![(ModelSize::Tiny, Device::Cuda)]);
}

#[tokio::test]
async fn given_empty_list_when_preloading_then_succeeds_without_calls() {
    let backend = ScriptedBackend::succeeding();

    preload_models(&backend, &[], Device::Cpu).await.unwrap();

    assert!(backend.preloaded().is_empty());
}
