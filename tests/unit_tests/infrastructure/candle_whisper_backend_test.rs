use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};

use transcription_api::infrastructure::audio::mel_filter_bank;
use transcription_api::infrastructure::backend::window_mel;

const N_MELS: usize = 80;
const D_MODEL: usize = 64;

fn tiny_config() -> Config {
    serde_json::from_value(serde_json::json!({
        "num_mel_bins": N_MELS,
        "max_source_positions": 1500,
        "d_model": D_MODEL,
        "encoder_attention_heads": 4,
        "encoder_layers": 1,
        "vocab_size": 128,
        "max_target_positions": 32,
        "decoder_attention_heads": 4,
        "decoder_layers": 1,
        "suppress_tokens": [],
        "begin_suppress_tokens": []
    }))
    .unwrap()
}

fn filters() -> Vec<f32> {
    mel_filter_bank(N_MELS, m::N_FFT, m::SAMPLE_RATE)
}

fn zero_whisper(config: &Config) -> m::model::Whisper {
    let vb = VarBuilder::zeros(DType::F32, &Device::Cpu);
    m::model::Whisper::load(&vb, config.clone()).unwrap()
}

#[test]
fn given_full_window_when_building_mel_then_frames_match_encoder_input() {
    let config = tiny_config();
    let window = vec![0.1f32; m::N_SAMPLES];

    let mel = window_mel(&config, &filters(), &window, &Device::Cpu).unwrap();

    assert_eq!(mel.dims(), &[1, N_MELS, m::N_FRAMES]);
}

#[test]
fn given_full_window_when_encoding_then_output_covers_every_source_position() {
    let config = tiny_config();
    let mut whisper = zero_whisper(&config);
    let window = vec![0.1f32; m::N_SAMPLES];

    let mel = window_mel(&config, &filters(), &window, &Device::Cpu).unwrap();
    let features = whisper.encoder.forward(&mel, true).unwrap();

    assert_eq!(
        features.dims(),
        &[1, config.max_source_positions, config.d_model]
    );
}

#[test]
fn given_short_tail_window_when_encoding_then_padded_to_same_shape() {
    let config = tiny_config();
    let mut whisper = zero_whisper(&config);
    let window = vec![0.1f32; 2 * m::SAMPLE_RATE];

    let mel = window_mel(&config, &filters(), &window, &Device::Cpu).unwrap();
    let features = whisper.encoder.forward(&mel, true).unwrap();

    assert_eq!(mel.dims(), &[1, N_MELS, m::N_FRAMES]);
    assert_eq!(
        features.dims(),
        &[1, config.max_source_positions, config.d_model]
    );
}
