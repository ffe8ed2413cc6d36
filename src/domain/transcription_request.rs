use super::{Device, Language, ModelSize, ValidationError};

/// Model parameters forwarded to the transcription backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscriptionOptions {
    pub model_size: ModelSize,
    pub language: Language,
    pub device: Device,
}

/// A validated submission for the job slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub options: TranscriptionOptions,
    pub source_url: Option<String>,
}

impl TranscriptionRequest {
    /// Validates raw query values. Absent values fall back to the defaults
    /// (`small`, `auto`, `cpu`); an empty URL counts as absent.
    pub fn parse(
        model_size: Option<&str>,
        language: Option<&str>,
        device: Option<&str>,
        source_url: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let model_size: ModelSize = model_size.map(str::parse).transpose()?.unwrap_or_default();
        let language: Language = language.map(str::parse).transpose()?.unwrap_or_default();
        let device: Device = device.map(str::parse).transpose()?.unwrap_or_default();
        let source_url = source_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from);

        Ok(Self {
            options: TranscriptionOptions {
                model_size,
                language,
                device,
            },
            source_url,
        })
    }

    pub fn require_source_url(&self) -> Result<&str, ValidationError> {
        self.source_url
            .as_deref()
            .ok_or(ValidationError::MissingField("uploaded_file_url"))
    }
}
