//! The coordinating loop: frame, detect, smooth, apply, concatenate.
//!
//! Processing is a sequential fold over frames with the previous smoothed
//! gain reduction as accumulator. The accumulator starts at zero for every
//! call and is dropped when the call returns, so independent buffers can be
//! compressed concurrently without any locking.

pub mod config;

pub use config::CompressorConfig;

use log::{debug, trace, warn};

use crate::{
    dsp::{amplify, framer},
    error::{CompressorError, Result},
};

/// The processed buffer plus what happened while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressorOutput {
    /// `(input.len() / frame_size) * frame_size` processed samples.
    pub samples: Vec<f32>,
    /// Unchanged from the input.
    pub sample_rate: u32,
    /// Smoothed (positive) gain reduction of each frame, in order.
    pub reductions: Vec<f32>,
    /// Trailing samples that did not fill a frame and were dropped.
    pub dropped_samples: usize,
}

impl CompressorOutput {
    pub fn frames_processed(&self) -> usize {
        self.reductions.len()
    }

    /// The accumulator value after the last frame, or zero if there were none.
    pub fn final_gain_reduction(&self) -> f32 {
        self.reductions.last().copied().unwrap_or(0.0)
    }
}

/// Compress a complete, pre-loaded mono buffer.
///
/// Fails with `InvalidConfig` before any frame is processed if `config` or
/// `sample_rate` is invalid. Non-finite samples are propagated, not clamped.
pub fn compress(
    samples: &[f32],
    sample_rate: u32,
    config: &CompressorConfig,
) -> Result<CompressorOutput> {
    if sample_rate == 0 {
        return Err(CompressorError::invalid_config(
            "sample_rate must be greater than zero",
        ));
    }
    config.validate()?;

    let mut frames = framer::frames(samples, config.frame_size)?;
    let (processed, reductions) = compress_frames(frames.by_ref(), config)?;
    let dropped_samples = frames.remainder().len();

    debug!(
        "compressed {} frames of {} samples at {} Hz ({} trailing samples dropped)",
        reductions.len(),
        config.frame_size,
        sample_rate,
        dropped_samples
    );
    if let Some(index) = processed.iter().position(|s| !s.is_finite()) {
        warn!("compressed output contains a non-finite sample at index {index}");
    }

    Ok(CompressorOutput {
        samples: processed,
        sample_rate,
        reductions,
        dropped_samples,
    })
}

/// Run the detect → smooth → apply chain over `frames` in the order given.
///
/// Returns the concatenated output and the smoothed reduction of every frame.
/// The frames are taken as-is, so callers that feed them in a different order
/// get a different result.
pub fn compress_frames<'a, I>(
    frames: I,
    config: &CompressorConfig,
) -> Result<(Vec<f32>, Vec<f32>)>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let detector = config.detector()?;
    let ballistics = config.ballistics();

    let mut output = Vec::new();
    let mut reductions = Vec::new();

    let final_reduction = frames
        .into_iter()
        .enumerate()
        .fold(0.0, |previous, (index, frame)| {
            let raw = detector.detect(frame);
            let smoothed = ballistics.step(previous, raw);
            trace!("frame {index}: raw reduction {raw}, smoothed {smoothed}");

            // Reduction is positive up to here; negate only to apply it.
            let start = output.len();
            output.extend_from_slice(frame);
            amplify::apply_gain(
                &mut output[start..],
                amplify::makeup_multiplier(-smoothed, config.gain),
            );

            reductions.push(smoothed);
            smoothed
        });
    trace!("final smoothed reduction {final_reduction}");

    Ok((output, reductions))
}
