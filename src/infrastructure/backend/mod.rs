mod backend_factory;
mod candle_whisper_backend;
mod openai_whisper_backend;
mod scaffold_backend;

pub use backend_factory::{BackendConfig, TranscriptionBackendFactory, TranscriptionProvider};
pub use candle_whisper_backend::{CandleWhisperBackend, window_mel};
pub use openai_whisper_backend::OpenAiWhisperBackend;
pub use scaffold_backend::ScaffoldBackend;
