//! Error taxonomy shared by the engine and its external collaborators.

use std::path::PathBuf;

/// Everything that can go wrong between reading a file and writing the
/// compressed result.
///
/// The engine itself only ever produces [`CompressorError::InvalidConfig`],
/// and always before the first frame is touched. The remaining variants come
/// from the loader, the writer and the request layer.
#[derive(thiserror::Error, Debug)]
pub enum CompressorError {
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to decode audio file {path}: {reason}")]
    DecodeFailure { path: PathBuf, reason: String },

    #[error("failed to encode audio file {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("unsupported file '{filename}' (expected .wav, .mp3, .flac or .ogg)")]
    UnsupportedFile { filename: String },

    #[error("non-finite sample at index {index}")]
    NumericAnomaly { index: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompressorError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        CompressorError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// True for failures caused by what the caller sent us rather than by
    /// the file contents or the machine.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            CompressorError::InvalidConfig { .. } | CompressorError::UnsupportedFile { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CompressorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_includes_reason() {
        let err = CompressorError::invalid_config("frame_size must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid configuration: frame_size must be greater than zero"
        );
        assert!(err.is_caller_error());
    }

    #[test]
    fn decode_failure_is_not_caller_error() {
        let err = CompressorError::DecodeFailure {
            path: PathBuf::from("uploads/song.wav"),
            reason: "not a RIFF file".into(),
        };
        assert!(!err.is_caller_error());
        assert!(err.to_string().contains("uploads/song.wav"));
    }
}
