mod media_fetcher;
mod transcription_backend;

pub use media_fetcher::{MediaFetchError, MediaFetcher};
pub use transcription_backend::{TranscriptionBackend, TranscriptionError};
