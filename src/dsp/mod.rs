//! The four stages of the compressor.
//!
//! Each stage is a pure function of its inputs. The only state that crosses a
//! frame boundary, the previous smoothed reduction, lives in the engine's fold
//! rather than in any of these modules.

/// Decibel-to-linear conversion and gain application.
pub mod amplify;
/// RMS level detection and raw gain reduction.
pub mod detector;
/// Fixed-size, non-overlapping framing.
pub mod framer;
/// Attack/release blending across frames.
pub mod smoother;

pub use detector::{Detector, ThresholdMode};
pub use smoother::Ballistics;
