use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candle_core::{D, IndexOp, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use tokenizers::Tokenizer;

use crate::application::ports::{MediaFetcher, TranscriptionBackend, TranscriptionError};
use crate::domain::{
    Device, Language, ModelSize, SUPPORTED_LANGUAGES, Transcript, TranscriptSegment,
    TranscriptionOptions,
};
use crate::infrastructure::audio::{TARGET_SAMPLE_RATE, decode_to_mono_16k, mel_filter_bank};

/// Runs Whisper in-process with candle, one cached model per size and device.
pub struct CandleWhisperBackend {
    fetcher: Arc<dyn MediaFetcher>,
    models: tokio::sync::Mutex<HashMap<(ModelSize, Device), Arc<LoadedModel>>>,
}

impl CandleWhisperBackend {
    pub fn new(fetcher: Arc<dyn MediaFetcher>) -> Self {
        Self {
            fetcher,
            models: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    async fn model(
        &self,
        size: ModelSize,
        device: Device,
    ) -> Result<Arc<LoadedModel>, TranscriptionError> {
        let mut models = self.models.lock().await;
        if let Some(model) = models.get(&(size, device)) {
            return Ok(Arc::clone(model));
        }

        let loaded = tokio::task::spawn_blocking(move || LoadedModel::load(size, device))
            .await
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("loader task: {}", e)))??;
        let loaded = Arc::new(loaded);
        models.insert((size, device), Arc::clone(&loaded));
        Ok(loaded)
    }
}

#[async_trait]
impl TranscriptionBackend for CandleWhisperBackend {
    async fn preload(
        &self,
        model_size: ModelSize,
        device: Device,
    ) -> Result<(), TranscriptionError> {
        self.model(model_size, device).await.map(|_| ())
    }

    async fn transcribe(
        &self,
        source_url: &str,
        options: &TranscriptionOptions,
    ) -> Result<Transcript, TranscriptionError> {
        let media = self.fetcher.fetch(source_url).await?;
        tracing::debug!(bytes = media.len(), "Media downloaded");

        let model = self.model(options.model_size, options.device).await?;
        let language = options.language;
        let english_only = options.model_size.is_english_only();

        tokio::task::spawn_blocking(move || {
            let pcm = decode_to_mono_16k(media)?;
            model.transcribe_pcm(&pcm, language, english_only)
        })
        .await
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("inference task: {}", e)))?
    }
}

struct LoadedModel {
    whisper: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: candle_core::Device,
    mel_filters: Vec<f32>,
}

struct PromptTokens {
    sot: u32,
    transcribe: u32,
    no_timestamps: u32,
    eot: u32,
}

impl LoadedModel {
    fn load(size: ModelSize, device: Device) -> Result<Self, TranscriptionError> {
        let device = match device {
            Device::Cpu => candle_core::Device::Cpu,
            Device::Cuda => candle_core::Device::new_cuda(0).map_err(load_failed("cuda"))?,
        };
        let repo_id = size.hf_repo();
        tracing::info!(repo = %repo_id, device = ?device, "Loading Whisper weights");

        let api = Api::new().map_err(load_failed("hub"))?;
        let repo = api.model(repo_id);
        let config_path = repo.get("config.json").map_err(load_failed("config.json"))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(load_failed("tokenizer.json"))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(load_failed("model.safetensors"))?;

        let config: Config = serde_json::from_str(
            &std::fs::read_to_string(config_path).map_err(load_failed("read config"))?,
        )
        .map_err(load_failed("parse config"))?;
        let tokenizer = Tokenizer::from_file(tokenizer_path).map_err(load_failed("tokenizer"))?;
        let mel_filters = mel_filter_bank(config.num_mel_bins, m::N_FFT, m::SAMPLE_RATE);

        // SAFETY: the safetensors file is mapped read-only and outlives the builder.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(load_failed("weights"))?
        };
        let whisper = m::model::Whisper::load(&vb, config.clone()).map_err(load_failed("model"))?;

        tracing::info!(model_size = %size, "Whisper model ready");
        Ok(Self {
            whisper: Mutex::new(whisper),
            tokenizer,
            config,
            device,
            mel_filters,
        })
    }

    fn transcribe_pcm(
        &self,
        pcm: &[f32],
        language: Language,
        english_only: bool,
    ) -> Result<Transcript, TranscriptionError> {
        let mut whisper = self
            .whisper
            .lock()
            .map_err(|_| inference("model lock")("poisoned"))?;
        let prompt = PromptTokens {
            sot: self.token(m::SOT_TOKEN)?,
            transcribe: self.token(m::TRANSCRIBE_TOKEN)?,
            no_timestamps: self.token(m::NO_TIMESTAMPS_TOKEN)?,
            eot: self.token(m::EOT_TOKEN)?,
        };

        let total_secs = pcm.len() as f64 / TARGET_SAMPLE_RATE as f64;
        let window_secs = m::CHUNK_LENGTH as f64;
        let mut language_code: Option<&'static str> = language.code();
        let mut segments = Vec::new();

        for (i, window) in pcm.chunks(m::N_SAMPLES).enumerate() {
            let mel = window_mel(&self.config, &self.mel_filters, window, &self.device)?;
            let features = whisper
                .encoder
                .forward(&mel, true)
                .map_err(inference("encoder"))?;

            if language_code.is_none() && !english_only {
                let detected = self.detect_language(&mut whisper, &features, prompt.sot)?;
                tracing::info!(language = detected, "Detected spoken language");
                language_code = Some(detected);
            }

            let mut tokens = vec![prompt.sot];
            if let Some(code) = language_code.filter(|_| !english_only) {
                tokens.push(self.token(&format!("<|{}|>", code))?);
            }
            tokens.push(prompt.transcribe);
            tokens.push(prompt.no_timestamps);

            let text = self.decode_window(&mut whisper, &features, tokens, prompt.eot)?;
            let start = i as f64 * window_secs;
            tracing::debug!(window = i, chars = text.len(), "Decoded audio window");
            if !text.is_empty() {
                segments.push(TranscriptSegment {
                    start,
                    end: (start + window_secs).min(total_secs),
                    text,
                });
            }
        }

        let language = language_code.or(english_only.then_some("en"));
        Ok(Transcript::from_segments(
            segments,
            language.map(String::from),
        ))
    }


    fn detect_language(
        &self,
        whisper: &mut m::model::Whisper,
        features: &Tensor,
        sot: u32,
    ) -> Result<&'static str, TranscriptionError> {
        let candidates: Vec<(&'static str, u32)> = SUPPORTED_LANGUAGES
            .iter()
            .filter_map(|code| {
                self.tokenizer
                    .token_to_id(&format!("<|{}|>", code))
                    .map(|id| (*code, id))
            })
            .collect();
        if candidates.is_empty() {
            return Err(inference("language detection")("no language tokens"));
        }

        let input = Tensor::new(&[[sot]], &self.device).map_err(inference("sot"))?;
        let hidden = whisper
            .decoder
            .forward(&input, features, true)
            .map_err(inference("decoder"))?;
        let logits = whisper
            .decoder
            .final_linear(&hidden.i(..1).map_err(inference("slice"))?)
            .map_err(inference("linear"))?
            .i(0)
            .and_then(|t| t.i(0))
            .map_err(inference("slice"))?;

        let ids: Vec<u32> = candidates.iter().map(|(_, id)| *id).collect();
        let ids = Tensor::new(ids.as_slice(), &self.device).map_err(inference("ids"))?;
        let best = logits
            .index_select(&ids, 0)
            .and_then(|t| t.argmax(D::Minus1))
            .and_then(|t| t.to_scalar::<u32>())
            .map_err(inference("language logits"))?;

        Ok(candidates[best as usize].0)
    }

    fn decode_window(
        &self,
        whisper: &mut m::model::Whisper,
        features: &Tensor,
        mut tokens: Vec<u32>,
        eot: u32,
    ) -> Result<String, TranscriptionError> {
        let prompt_len = tokens.len();
        let max_tokens = self.config.max_target_positions / 2;

        for _ in 0..max_tokens {
            let input = Tensor::new(tokens.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(inference("tokens"))?;
            let hidden = whisper
                .decoder
                .forward(&input, features, tokens.len() == prompt_len)
                .map_err(inference("decoder"))?;
            let logits = hidden
                .squeeze(0)
                .and_then(|h| whisper.decoder.final_linear(&h))
                .map_err(inference("linear"))?;
            let last = logits
                .dim(0)
                .and_then(|len| logits.get(len - 1))
                .map_err(inference("logits"))?;
            let next = last
                .argmax(0)
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(inference("argmax"))?;

            if next == eot {
                break;
            }
            tokens.push(next);
        }

        whisper.reset_kv_cache();
        let text = self
            .tokenizer
            .decode(&tokens[prompt_len..], true)
            .map_err(inference("detokenize"))?;
        Ok(text.trim().to_string())
    }

    fn token(&self, token: &str) -> Result<u32, TranscriptionError> {
        self.tokenizer
            .token_to_id(token)
            .ok_or_else(|| inference("tokenizer")(format!("missing token {}", token)))
    }
}

/// Log-mel features for one window, shaped `(1, n_mels, N_FRAMES)`.
///
/// `pcm_to_mel` pads the signal on its own, so the frames past one 30 s
/// window are cut off to match the encoder's positional table.
pub fn window_mel(
    config: &Config,
    filters: &[f32],
    window: &[f32],
    device: &candle_core::Device,
) -> Result<Tensor, TranscriptionError> {
    let mut samples = window.to_vec();
    samples.resize(m::N_SAMPLES, 0.0);
    let mel = m::audio::pcm_to_mel(config, &samples, filters);
    let n_mels = config.num_mel_bins;
    let frames = mel.len() / n_mels;
    if frames < m::N_FRAMES {
        return Err(inference("mel")(format!(
            "expected at least {} frames, got {}",
            m::N_FRAMES,
            frames
        )));
    }
    Tensor::from_vec(mel, (1, n_mels, frames), device)
        .and_then(|t| t.narrow(2, 0, m::N_FRAMES))
        .and_then(|t| t.contiguous())
        .map_err(inference("mel"))
}

fn load_failed<E: std::fmt::Display>(stage: &'static str) -> impl Fn(E) -> TranscriptionError {
    move |e| TranscriptionError::ModelLoadFailed(format!("{}: {}", stage, e))
}

fn inference<E: std::fmt::Display>(stage: &'static str) -> impl Fn(E) -> TranscriptionError {
    move |e| TranscriptionError::TranscriptionFailed(format!("{}: {}", stage, e))
}
