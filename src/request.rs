//! Request/response layer around the engine.
//!
//! Callers send loosely typed form fields; this module turns them into a
//! [`CompressorConfig`], runs the load → compress → write pipeline, and
//! reports either a downloadable file or a JSON error payload.

use std::path::{Path, PathBuf};

use log::{error, info};
use serde::Serialize;

use crate::{
    dsp::ThresholdMode,
    engine::{self, CompressorConfig},
    error::{CompressorError, Result},
    io::{
        decode, upload,
        wav::{self, WavFormat},
        AudioBuffer,
    },
};

/// Name of the file produced for every request.
pub const OUTPUT_FILE_NAME: &str = "compressed_audio.wav";

/// A parsed compression request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompressRequest {
    pub config: CompressorConfig,
    pub format: WavFormat,
}

impl CompressRequest {
    /// Build a request from form fields, falling back to defaults for
    /// anything absent. Unknown keys are ignored.
    pub fn from_form<I, K, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = CompressorConfig::default();
        let mut format = WavFormat::default();

        for (key, value) in fields {
            let key = key.as_ref();
            let value = value.as_ref().trim();
            match key {
                "threshold" => config.threshold = parse_number(key, value)?,
                "ratio" => config.ratio = parse_number(key, value)?,
                "attack_time" => config.attack_time = parse_number(key, value)?,
                "release_time" => config.release_time = parse_number(key, value)?,
                "gain" => config.gain = parse_number(key, value)?,
                "frame_size" => config.frame_size = parse_number(key, value)?,
                "threshold_mode" => config.threshold_mode = parse_threshold_mode(value)?,
                "format" => format = parse_format(value)?,
                _ => {}
            }
        }

        config.validate()?;
        Ok(Self { config, format })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| CompressorError::InvalidConfig {
        reason: format!("{key} must be a number, got '{value}'"),
    })
}

pub fn parse_threshold_mode(value: &str) -> Result<ThresholdMode> {
    match value.to_ascii_lowercase().as_str() {
        "linear" => Ok(ThresholdMode::Linear),
        "db" | "decibel" => Ok(ThresholdMode::Decibel),
        other => Err(CompressorError::InvalidConfig {
            reason: format!("threshold_mode must be 'linear' or 'db', got '{other}'"),
        }),
    }
}

fn parse_format(value: &str) -> Result<WavFormat> {
    match value.to_ascii_lowercase().as_str() {
        "pcm16" => Ok(WavFormat::Pcm16),
        "float32" => Ok(WavFormat::Float32),
        other => Err(CompressorError::InvalidConfig {
            reason: format!("format must be 'pcm16' or 'float32', got '{other}'"),
        }),
    }
}

/// A successfully written result, ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressResponse {
    pub output_path: PathBuf,
    pub attachment_name: String,
    pub sample_rate: u32,
    pub samples_written: usize,
}

/// Structured failure body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(skip)]
    status: u16,
}

impl ErrorPayload {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&CompressorError> for ErrorPayload {
    fn from(err: &CompressorError) -> Self {
        let status = if err.is_caller_error() { 400 } else { 500 };
        Self {
            error: err.to_string(),
            status,
        }
    }
}

/// Compress the uploaded file at `input` and write the result into `output_dir`.
pub fn handle(
    request: &CompressRequest,
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<CompressResponse> {
    let input = input.as_ref();
    let filename = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !upload::is_allowed(&filename) {
        return Err(CompressorError::UnsupportedFile { filename });
    }

    let source = decode::load(input)?;
    let output = engine::compress(&source.samples, source.sample_rate, &request.config)?;
    let result = AudioBuffer::from(output);

    let output_path = output_dir.as_ref().join(OUTPUT_FILE_NAME);
    wav::write(&output_path, &result, request.format)?;

    info!(
        "compressed {} ({} samples) into {}",
        filename,
        source.len(),
        output_path.display()
    );

    Ok(CompressResponse {
        output_path,
        attachment_name: OUTPUT_FILE_NAME.to_string(),
        sample_rate: result.sample_rate,
        samples_written: result.len(),
    })
}

/// [`handle`], with failures already turned into an [`ErrorPayload`].
pub fn respond(
    request: &CompressRequest,
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> std::result::Result<CompressResponse, ErrorPayload> {
    handle(request, input, output_dir).map_err(|err| {
        error!("compression request failed: {err}");
        ErrorPayload::from(&err)
    })
}
