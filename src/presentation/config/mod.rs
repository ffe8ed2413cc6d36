mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    JobSettings, LoggingSettings, ServerSettings, Settings, SettingsError, SupervisorSettings,
    TranscriptionSettings, WHISPER_MODELS_VAR,
};
