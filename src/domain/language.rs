use std::fmt;
use std::str::FromStr;

use super::ValidationError;

const AUTO: &str = "auto";

/// Whisper language codes accepted by the service.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "nl", "ca", "ru", "uk", "pl", "cs", "sv", "da", "fi",
    "no", "tr", "el", "hu", "ro", "ar", "he", "hi", "ja", "ko", "zh", "vi", "id",
];

/// Spoken language hint, either a fixed code or automatic detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Language(Option<&'static str>);

impl Language {
    pub const AUTO: Language = Language(None);

    /// `None` means the backend should detect the language itself.
    pub fn code(&self) -> Option<&'static str> {
        self.0
    }

    pub fn is_auto(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> &'static str {
        self.0.unwrap_or(AUTO)
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == AUTO {
            return Ok(Language::AUTO);
        }
        SUPPORTED_LANGUAGES
            .iter()
            .find(|code| **code == s)
            .map(|code| Language(Some(code)))
            .ok_or_else(|| {
                let mut allowed = vec![AUTO];
                allowed.extend_from_slice(SUPPORTED_LANGUAGES);
                ValidationError::invalid("language", s, &allowed)
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
