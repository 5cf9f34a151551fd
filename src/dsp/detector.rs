//! Per-frame RMS envelope detection.

/*
Envelope Detection
==================

The detector answers one question per frame: "how much should this frame be
turned down?" It does NOT apply anything and it has no memory. Smoothing
across frames is the smoother's job.

Vocabulary
----------

  RMS           Root-mean-square level of a frame. A single number that
                describes how loud the frame is on average:

                    rms = sqrt( (s0² + s1² + ... + sN-1²) / N )

                A full-scale sine has an RMS of ~0.707, silence has 0.

  threshold     The level above which the compressor starts working.

  ratio         How hard the compressor pushes back once above threshold.
                Higher ratio = less reduction per unit of overshoot in the
                linear mode below.

  reduction     How much to cut, stored as a POSITIVE number. It is only
                turned into a negative gain right before it is applied.


Linear Mode (default)
---------------------

The literal behaviour of the reference compressor:

    if rms > threshold:
        reduction = (rms - threshold) / ratio
    else:
        reduction = 0

Everything here is in LINEAR amplitude units. Nothing is converted to dB,
even though the default threshold of -20 looks like a dBFS figure. With a
negative threshold every non-silent frame is "above threshold", and the
reduction is roughly (rms + 20) / ratio, i.e. about 5 for the defaults.
That value is later read as decibels by the gain stage.

The comparison is strict: a frame sitting exactly on the threshold gets no
reduction.


Decibel Mode (opt-in)
---------------------

A conventional reading of the same parameters, with the threshold in dBFS:

    rms_db = 20 × log10(rms)               silence → -inf, never above
    if rms_db > threshold:
        reduction = (rms_db - threshold) × (1 - 1/ratio)

For a 4:1 ratio, a frame 8 dB over the threshold is pulled down by 6 dB so
that it ends up only 2 dB over. Ratios below 1 would turn into upward gain
and are rejected in this mode.
*/

use crate::error::{CompressorError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the detector interprets `threshold` and produces its reduction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThresholdMode {
    /// Linear RMS compared against a linear threshold, reduction divided by ratio.
    #[default]
    Linear,
    /// RMS converted to dBFS, threshold read as dBFS, reduction in dB.
    Decibel,
}

/// Root-mean-square level of a frame.
///
/// An empty frame has no defined level; the framer never produces one.
#[inline]
pub fn rms(frame: &[f32]) -> f32 {
    debug_assert!(!frame.is_empty());
    let sum_sq: f32 = frame.iter().map(|&s| s * s).sum();
    (sum_sq / frame.len() as f32).sqrt()
}

/// Raw gain reduction for one frame in linear mode.
///
/// Fails with `InvalidConfig` when `ratio` is zero.
pub fn gain_reduction(frame: &[f32], threshold: f32, ratio: f32) -> Result<f32> {
    Ok(Detector::new(threshold, ratio, ThresholdMode::Linear)?.detect(frame))
}

/// A validated `(threshold, ratio, mode)` triple.
///
/// Construction is the only fallible step, so the per-frame call can stay
/// infallible once processing has started.
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    threshold: f32,
    ratio: f32,
    mode: ThresholdMode,
}

impl Detector {
    pub fn new(threshold: f32, ratio: f32, mode: ThresholdMode) -> Result<Self> {
        if ratio == 0.0 {
            return Err(CompressorError::invalid_config("ratio must not be zero"));
        }
        if !ratio.is_finite() || !threshold.is_finite() {
            return Err(CompressorError::invalid_config(
                "threshold and ratio must be finite",
            ));
        }
        if mode == ThresholdMode::Decibel && ratio < 1.0 {
            return Err(CompressorError::invalid_config(
                "ratio must be at least 1 when the threshold is in dB",
            ));
        }
        Ok(Self {
            threshold,
            ratio,
            mode,
        })
    }

    pub fn mode(&self) -> ThresholdMode {
        self.mode
    }

    /// Positive "how much to cut" amount for `frame`.
    pub fn detect(&self, frame: &[f32]) -> f32 {
        let level = rms(frame);
        match self.mode {
            ThresholdMode::Linear => {
                if level > self.threshold {
                    (level - self.threshold) / self.ratio
                } else {
                    0.0
                }
            }
            ThresholdMode::Decibel => {
                let level_db = 20.0 * level.log10();
                if level_db > self.threshold {
                    (level_db - self.threshold) * (1.0 - 1.0 / self.ratio)
                } else {
                    0.0
                }
            }
        }
    }
}
