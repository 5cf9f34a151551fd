//! WAV source loader and sink writer.

/*
Loading
=======

Any PCM or float WAV that `hound` can parse is accepted:

  8 / 16 / 24 / 32-bit integer   scaled by 1 / 2^(bits-1) into [-1, 1)
  32-bit float                   taken as-is

Multi-channel files are averaged down to a single channel, since the engine
is mono. The native sample rate is kept; nothing is resampled.

Every failure becomes `DecodeFailure`. The loader never hands back an empty
buffer in place of an error.


Writing
=======

  Pcm16     16-bit integer, clamped to [-1, 1] and rounded (default)
  Float32   32-bit float, written unclamped

A buffer containing NaN or infinity is refused with `NumericAnomaly` before
the file is created. The parent directory is created if needed.
*/

use std::{fs, path::Path};

use log::{debug, info};

use super::{downmix, AudioBuffer};
use crate::error::{CompressorError, Result};

/// Sample encoding for written files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WavFormat {
    #[default]
    Pcm16,
    Float32,
}

impl WavFormat {
    fn spec(self, sample_rate: u32) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            WavFormat::Pcm16 => (16, hound::SampleFormat::Int),
            WavFormat::Float32 => (32, hound::SampleFormat::Float),
        };
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

/// Decode `path` into a mono [`AudioBuffer`].
pub fn load(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let decode_failure = |reason: String| CompressorError::DecodeFailure {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = hound::WavReader::open(path).map_err(|e| decode_failure(e.to_string()))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(decode_failure("file declares zero channels".into()));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, hound::Error>>()
            .map_err(|e| decode_failure(e.to_string()))?,
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<Vec<f32>, hound::Error>>()
                .map_err(|e| decode_failure(e.to_string()))?
        }
    };

    let samples = downmix(&interleaved, spec.channels as usize);
    debug!(
        "decoded {}: {} channel(s), {} bit {:?}, {} Hz",
        path.display(),
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format,
        spec.sample_rate
    );

    Ok(AudioBuffer::new(samples, spec.sample_rate))
}

/// Encode `buffer` as a mono WAV file at `path`.
pub fn write(path: impl AsRef<Path>, buffer: &AudioBuffer, format: WavFormat) -> Result<()> {
    let path = path.as_ref();
    if let Some(index) = buffer.samples.iter().position(|s| !s.is_finite()) {
        return Err(CompressorError::NumericAnomaly { index });
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let encode = |e: hound::Error| CompressorError::Encode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut writer =
        hound::WavWriter::create(path, format.spec(buffer.sample_rate)).map_err(encode)?;
    match format {
        WavFormat::Pcm16 => {
            for &s in &buffer.samples {
                let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
                writer.write_sample(v).map_err(encode)?;
            }
        }
        WavFormat::Float32 => {
            for &s in &buffer.samples {
                writer.write_sample(s).map_err(encode)?;
            }
        }
    }
    writer.finalize().map_err(encode)?;

    info!(
        "wrote {} samples ({:.2}s) to {}",
        buffer.len(),
        buffer.duration_secs(),
        path.display()
    );
    Ok(())
}
