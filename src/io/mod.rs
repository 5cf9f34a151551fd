// Purpose - external interfaces: decoding uploads, encoding results

pub mod decode;
pub mod upload;
pub mod wav;

/// A decoded mono signal and its sample rate.
///
/// This is the shape the engine consumes and produces; the loader in
/// [`decode`] and the writer in [`wav`] translate between it and files on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds, or zero for a buffer without a sample rate.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

impl From<crate::engine::CompressorOutput> for AudioBuffer {
    fn from(output: crate::engine::CompressorOutput) -> Self {
        Self::new(output.samples, output.sample_rate)
    }
}

/// Average interleaved frames of `channels` samples into one channel.
pub(crate) fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
