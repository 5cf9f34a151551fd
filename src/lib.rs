pub mod dsp; // Framing, detection, smoothing, gain
pub mod engine; // Sequential frame loop
pub mod error;
pub mod io;
#[cfg(feature = "service")]
pub mod request; // Form parameters, pipeline, error payloads

pub use engine::{compress, CompressorConfig, CompressorOutput};
pub use error::{CompressorError, Result};

pub const DEFAULT_FRAME_SIZE: usize = 1024;
