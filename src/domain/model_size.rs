use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Whisper checkpoint sizes the service can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelSize {
    Tiny,
    TinyEn,
    Base,
    BaseEn,
    #[default]
    Small,
    SmallEn,
    Medium,
    MediumEn,
    LargeV1,
    LargeV2,
    LargeV3,
}

impl ModelSize {
    pub const ALL: [ModelSize; 11] = [
        ModelSize::Tiny,
        ModelSize::TinyEn,
        ModelSize::Base,
        ModelSize::BaseEn,
        ModelSize::Small,
        ModelSize::SmallEn,
        ModelSize::Medium,
        ModelSize::MediumEn,
        ModelSize::LargeV1,
        ModelSize::LargeV2,
        ModelSize::LargeV3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::TinyEn => "tiny.en",
            ModelSize::Base => "base",
            ModelSize::BaseEn => "base.en",
            ModelSize::Small => "small",
            ModelSize::SmallEn => "small.en",
            ModelSize::Medium => "medium",
            ModelSize::MediumEn => "medium.en",
            ModelSize::LargeV1 => "large-v1",
            ModelSize::LargeV2 => "large-v2",
            ModelSize::LargeV3 => "large-v3",
        }
    }

    /// Hugging Face repository holding the checkpoint.
    pub fn hf_repo(&self) -> String {
        match self {
            ModelSize::LargeV1 => "openai/whisper-large".to_string(),
            other => format!("openai/whisper-{}", other.as_str()),
        }
    }

    pub fn is_english_only(&self) -> bool {
        self.as_str().ends_with(".en")
    }

    /// Parses a comma separated list such as `"small,large-v3"`, skipping blanks.
    pub fn parse_list(list: &str) -> Result<Vec<ModelSize>, ValidationError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for ModelSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelSize::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = ModelSize::ALL.iter().map(|m| m.as_str()).collect();
                ValidationError::invalid("model_size", s, &allowed)
            })
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
