//! Upload filename checks.

use std::path::Path;

/// Extensions accepted from callers; each one has a decoder in [`super::decode`].
pub const ALLOWED_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg"];

/// True if `filename` has one of the [`ALLOWED_EXTENSIONS`], case-insensitive.
pub fn is_allowed(filename: &str) -> bool {
    extension(filename)
        .map(|ext| ALLOWED_EXTENSIONS.iter().any(|allowed| ext == *allowed))
        .unwrap_or(false)
}

/// Lower-cased extension of `filename`, if it has one.
pub fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
