use std::io::Cursor;

use rubato::{FftFixedIn, Resampler};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::TranscriptionError;

pub const TARGET_SAMPLE_RATE: u32 = 16_000;
const RESAMPLE_CHUNK: usize = 1024;

/// Decodes any container symphonia can probe into 16 kHz mono samples.
pub fn decode_to_mono_16k(data: Vec<u8>) -> Result<Vec<f32>, TranscriptionError> {
    let stream = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());
    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decoding("probe", e))?;
    let mut reader = probed.format;

    let track = reader
        .default_track()
        .ok_or_else(|| TranscriptionError::DecodingFailed("no audio track".to_string()))?;
    let track_id = track.id;
    let params = track.codec_params.clone();
    let source_rate = params
        .sample_rate
        .ok_or_else(|| TranscriptionError::DecodingFailed("unknown sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| decoding("codec", e))?;

    let mut mono = Vec::new();
    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(decoding("packet", e)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let buffer = match decoder.decode(&packet) {
            Ok(buffer) => buffer,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping undecodable frame");
                continue;
            }
            Err(e) => return Err(decoding("decode", e)),
        };
        if buffer.frames() == 0 {
            continue;
        }

        let spec = *buffer.spec();
        let channels = spec.channels.count().max(1);
        let mut samples = SampleBuffer::<f32>::new(buffer.capacity() as u64, spec);
        samples.copy_interleaved_ref(buffer);
        mono.extend(
            samples
                .samples()
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
        );
    }

    if mono.is_empty() {
        return Err(TranscriptionError::DecodingFailed(
            "stream contained no samples".to_string(),
        ));
    }

    let pcm = if source_rate == TARGET_SAMPLE_RATE {
        mono
    } else {
        resample(&mono, source_rate, TARGET_SAMPLE_RATE)?
    };

    tracing::debug!(
        source_rate,
        samples = pcm.len(),
        seconds = pcm.len() as f32 / TARGET_SAMPLE_RATE as f32,
        "Decoded media to 16kHz mono"
    );
    Ok(pcm)
}

/// Converts a mono signal between sample rates, padding the tail chunk and
/// trimming the output back to the proportional length.
pub fn resample(samples: &[f32], from: u32, to: u32) -> Result<Vec<f32>, TranscriptionError> {
    let mut resampler = FftFixedIn::<f32>::new(from as usize, to as usize, RESAMPLE_CHUNK, 2, 1)
        .map_err(|e| decoding("resampler", e))?;
    // The resampler rounds the chunk to its FFT size.
    let chunk_len = resampler.input_frames_next();

    let expected = (samples.len() as u64 * to as u64 / from as u64) as usize;
    let mut output = Vec::with_capacity(expected + resampler.output_frames_max());

    for chunk in samples.chunks(chunk_len) {
        let mut input = chunk.to_vec();
        input.resize(chunk_len, 0.0);
        let frames = resampler
            .process(&[input], None)
            .map_err(|e| decoding("resample", e))?;
        if let Some(channel) = frames.into_iter().next() {
            output.extend(channel);
        }
    }

    output.truncate(expected);
    Ok(output)
}

fn decoding(stage: &str, e: impl std::fmt::Display) -> TranscriptionError {
    TranscriptionError::DecodingFailed(format!("{}: {}", stage, e))
}
