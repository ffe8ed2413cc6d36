use crate::application::ports::{TranscriptionBackend, TranscriptionError};
use crate::domain::{Device, ModelSize};

/// Warms every listed model in order and stops at the first failure.
pub async fn preload_models(
    backend: &dyn TranscriptionBackend,
    models: &[ModelSize],
    device: Device,
) -> Result<(), TranscriptionError> {
    for model in models {
        tracing::info!(model_size = %model, device = %device, "Preloading model");
        backend.preload(*model, device).await?;
    }
    tracing::info!(count = models.len(), "Model preload finished");
    Ok(())
}
