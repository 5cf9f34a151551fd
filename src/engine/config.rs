//! Compressor parameters.

use crate::{
    dsp::{Ballistics, Detector, ThresholdMode},
    error::{CompressorError, Result},
    DEFAULT_FRAME_SIZE,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Threshold in linear amplitude units (dBFS when `ThresholdMode::Decibel`).
pub const DEFAULT_THRESHOLD: f32 = -20.0;
pub const DEFAULT_RATIO: f32 = 4.0;
/// Attack blend coefficient.
pub const DEFAULT_ATTACK_TIME: f32 = 0.1;
/// Release blend coefficient.
pub const DEFAULT_RELEASE_TIME: f32 = 0.5;
/// Makeup gain in dB.
pub const DEFAULT_GAIN: f32 = 0.0;

/// Everything the engine needs to know about one compression run.
///
/// Built once per request and never mutated while a buffer is processed.
/// `attack_time` and `release_time` are blend coefficients, not seconds;
/// see [`crate::dsp::smoother`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorConfig {
    pub threshold: f32,
    pub ratio: f32,
    pub attack_time: f32,
    pub release_time: f32,
    pub gain: f32,
    pub frame_size: usize,
    pub threshold_mode: ThresholdMode,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            ratio: DEFAULT_RATIO,
            attack_time: DEFAULT_ATTACK_TIME,
            release_time: DEFAULT_RELEASE_TIME,
            gain: DEFAULT_GAIN,
            frame_size: DEFAULT_FRAME_SIZE,
            threshold_mode: ThresholdMode::Linear,
        }
    }
}

impl CompressorConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_attack_time(mut self, attack_time: f32) -> Self {
        self.attack_time = attack_time;
        self
    }

    pub fn with_release_time(mut self, release_time: f32) -> Self {
        self.release_time = release_time;
        self
    }

    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn with_threshold_mode(mut self, mode: ThresholdMode) -> Self {
        self.threshold_mode = mode;
        self
    }

    /// Reject structurally invalid parameters before any frame is touched.
    ///
    /// Attack and release outside `[0, 1]` are accepted as-is.
    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(CompressorError::invalid_config(
                "frame_size must be greater than zero",
            ));
        }
        for (name, value) in [
            ("attack_time", self.attack_time),
            ("release_time", self.release_time),
            ("gain", self.gain),
        ] {
            if !value.is_finite() {
                return Err(CompressorError::invalid_config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        self.detector().map(|_| ())
    }

    pub fn detector(&self) -> Result<Detector> {
        Detector::new(self.threshold, self.ratio, self.threshold_mode)
    }

    pub fn ballistics(&self) -> Ballistics {
        Ballistics::new(self.attack_time, self.release_time)
    }
}
