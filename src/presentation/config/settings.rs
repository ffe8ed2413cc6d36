use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{ConflictPolicy, JobSlotPolicy};
use crate::domain::{Device, ModelSize, ValidationError};
use crate::infrastructure::backend::{BackendConfig, TranscriptionProvider};
use crate::infrastructure::observability::TracingConfig;

use super::Environment;

/// Legacy variable holding the comma separated models to warm at startup.
pub const WHISPER_MODELS_VAR: &str = "WHISPER_MODELS";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub jobs: JobSettings,
    pub supervisor: SupervisorSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    /// Comma separated model sizes, e.g. `small,large-v3`.
    pub preload_models: String,
    pub preload_device: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_override: Option<String>,
    pub max_media_size_mb: u64,
    pub download_timeout_secs: u64,
    pub scaffold_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSettings {
    pub conflict_policy: ConflictPolicy,
    pub require_source_url: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupervisorSettings {
    pub enabled: bool,
    pub timeout_secs: u64,
    pub command: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("transcription settings: {0}")]
    Invalid(#[from] ValidationError),
}

impl Settings {
    /// Layers built-in defaults, `appsettings.<env>` (optional) and
    /// `APP__SECTION__KEY` environment variables, in that order.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let mut builder = Self::defaults()?.add_source(
            File::with_name(&environment.settings_file()).required(false),
        );
        builder = builder.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        );
        if let Ok(models) = std::env::var(WHISPER_MODELS_VAR) {
            builder = builder.set_override("transcription.preload_models", models)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("transcription.provider", "local")?
            .set_default("transcription.preload_models", "large-v3")?
            .set_default("transcription.preload_device", "cpu")?
            .set_default("transcription.max_media_size_mb", 512)?
            .set_default("transcription.download_timeout_secs", 300)?
            .set_default("transcription.scaffold_delay_ms", 0)?
            .set_default("jobs.conflict_policy", "replace")?
            .set_default("jobs.require_source_url", false)?
            .set_default("supervisor.enabled", false)?
            .set_default("supervisor.timeout_secs", 600)?
            .set_default("supervisor.command", "runpodctl stop pod $RUNPOD_POD_ID")?
            .set_default("logging.level", "info,transcription_api=debug,tower_http=debug")?
            .set_default("logging.json_format", false)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.transcription.models()?;
        self.transcription.device()?;
        Ok(())
    }

    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig {
            environment: environment.to_string(),
            json_format: self.logging.json_format,
            default_filter: self.logging.level.clone(),
        }
    }

    pub fn job_slot_policy(&self) -> JobSlotPolicy {
        JobSlotPolicy {
            conflict: self.jobs.conflict_policy,
            require_source_url: self.jobs.require_source_url,
        }
    }
}

impl TranscriptionSettings {
    pub fn models(&self) -> Result<Vec<ModelSize>, ValidationError> {
        ModelSize::parse_list(&self.preload_models)
    }

    pub fn device(&self) -> Result<Device, ValidationError> {
        self.preload_device.parse()
    }

    pub fn max_media_bytes(&self) -> u64 {
        self.max_media_size_mb * 1024 * 1024
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            provider: self.provider,
            api_key: self.api_key.clone().filter(|k| !k.is_empty()),
            base_url: self.base_url.clone().filter(|u| !u.is_empty()),
            model_override: self.model_override.clone().filter(|m| !m.is_empty()),
            scaffold_delay: Duration::from_millis(self.scaffold_delay_ms),
        }
    }
}
