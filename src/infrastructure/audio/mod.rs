mod audio_decoder;
mod mel_filters;

pub use audio_decoder::{TARGET_SAMPLE_RATE, decode_to_mono_16k, resample};
pub use mel_filters::{hz_to_mel, mel_filter_bank, mel_to_hz};
