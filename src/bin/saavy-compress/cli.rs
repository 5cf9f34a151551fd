//! Command-line arguments. Every compressor parameter is optional and falls
//! back to the same defaults as the form-based request layer.

use std::path::PathBuf;

use clap::Parser;
use saavy_compressor::{
    dsp::ThresholdMode,
    engine::config::{
        DEFAULT_ATTACK_TIME, DEFAULT_GAIN, DEFAULT_RATIO, DEFAULT_RELEASE_TIME, DEFAULT_THRESHOLD,
    },
    io::wav::WavFormat,
    request::{parse_threshold_mode, CompressRequest},
    CompressorConfig, DEFAULT_FRAME_SIZE,
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Frame-based dynamic range compressor for audio files.",
    long_about = "Reads a WAV, MP3, FLAC or Ogg file, compresses it frame by frame and writes\n\
    compressed_audio.wav into the output directory. On failure a JSON\n\
    error object is printed to stdout."
)]
pub struct Cli {
    /// Input audio file (.wav, .mp3, .flac or .ogg).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory the compressed file is written to.
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Threshold (linear amplitude, or dBFS with --threshold-mode db).
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,

    #[arg(long, default_value_t = DEFAULT_RATIO)]
    pub ratio: f32,

    /// Attack blend coefficient, 0 (frozen) to 1 (instant).
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_ATTACK_TIME)]
    pub attack_time: f32,

    /// Release blend coefficient, 0 (frozen) to 1 (instant).
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_RELEASE_TIME)]
    pub release_time: f32,

    /// Makeup gain in dB.
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_GAIN)]
    pub gain: f32,

    #[arg(long, value_name = "SAMPLES", default_value_t = DEFAULT_FRAME_SIZE)]
    pub frame_size: usize,

    /// How the threshold is read: `linear` or `db`.
    #[arg(
        long,
        value_name = "MODE",
        default_value = "linear",
        value_parser = parse_threshold_mode
    )]
    pub threshold_mode: ThresholdMode,

    /// Write 32-bit float samples instead of 16-bit PCM.
    #[arg(long)]
    pub float: bool,
}

impl Cli {
    pub fn request(&self) -> CompressRequest {
        CompressRequest {
            config: CompressorConfig {
                threshold: self.threshold,
                ratio: self.ratio,
                attack_time: self.attack_time,
                release_time: self.release_time,
                gain: self.gain,
                frame_size: self.frame_size,
                threshold_mode: self.threshold_mode,
            },
            format: if self.float {
                WavFormat::Float32
            } else {
                WavFormat::Pcm16
            },
        }
    }
}
