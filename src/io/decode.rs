//! Format-dispatching source loader.

/*
Decoding
========

Uploads are routed by extension:

  .wav                  hound, see [`super::wav::load`]
  .mp3 / .flac / .ogg   symphonia, with the extension as a format hint

The symphonia path pulls packets from the first audio track until the
stream ends. A packet that fails to decode is skipped; anything else that
goes wrong (unreadable file, unknown container, no audio track, unknown
sample rate) is a `DecodeFailure`. Samples come out of symphonia as f32
in [-1, 1] and are averaged down to mono exactly like the WAV path.
*/

use std::{fs::File, io::ErrorKind, path::Path};

use log::debug;
use symphonia::core::{
    audio::SampleBuffer,
    codecs::{DecoderOptions, CODEC_TYPE_NULL},
    errors::Error as SymphoniaError,
    formats::FormatOptions,
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};

use super::{downmix, upload, wav, AudioBuffer};
use crate::error::{CompressorError, Result};

/// Decode `path` into a mono [`AudioBuffer`], whatever its format.
pub fn load(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let extension = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(upload::extension);

    match extension.as_deref() {
        Some("wav") => wav::load(path),
        other => load_compressed(path, other),
    }
}

fn load_compressed(path: &Path, extension: Option<&str>) -> Result<AudioBuffer> {
    let decode_failure = |reason: String| CompressorError::DecodeFailure {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| decode_failure(e.to_string()))?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let opened = symphonia::default::get_probe()
        .format(&hint, stream, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| decode_failure(e.to_string()))?;
    let mut format = opened.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| decode_failure("no audio track".into()))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_failure(e.to_string()))?;

    let mut interleaved = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(decode_failure(e.to_string())),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                debug!("skipping undecodable packet in {}: {e}", path.display());
                continue;
            }
            Err(e) => return Err(decode_failure(e.to_string())),
        };

        let spec = *decoded.spec();
        sample_rate.get_or_insert(spec.rate);
        channels.get_or_insert(spec.channels.count());

        let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        interleaved.extend_from_slice(buffer.samples());
    }

    let sample_rate = sample_rate.ok_or_else(|| decode_failure("unknown sample rate".into()))?;
    let channels = channels.unwrap_or(1);
    if channels == 0 {
        return Err(decode_failure("stream declares zero channels".into()));
    }

    debug!(
        "decoded {}: {} channel(s), {} Hz, {} interleaved samples",
        path.display(),
        channels,
        sample_rate,
        interleaved.len()
    );

    Ok(AudioBuffer::new(downmix(&interleaved, channels), sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAC_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/tone.flac");

    #[test]
    fn decodes_flac_fixture_to_normalised_mono() {
        let buffer = load(FLAC_FIXTURE).unwrap();
        assert_eq!(buffer.sample_rate, 8_000);
        assert_eq!(buffer.len(), 32);

        let head = [0.0, 0.25, 0.5, -0.5, -0.25, 32_767.0 / 32_768.0, -1.0, 0.125];
        let mut expected: Vec<f32> = head.iter().chain(head.iter()).copied().collect();
        expected.extend(std::iter::repeat(0.5).take(16));

        for (i, (&got, &want)) in buffer.samples.iter().zip(&expected).enumerate() {
            assert!((got - want).abs() < 1e-4, "sample {i}: {got} != {want}");
        }
    }

    #[test]
    fn garbage_mp3_is_a_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        std::fs::write(&path, b"no frames in here").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, CompressorError::DecodeFailure { .. }));
    }

    #[test]
    fn missing_flac_is_a_decode_failure() {
        let err = load("does/not/exist.flac").unwrap_err();
        assert!(matches!(err, CompressorError::DecodeFailure { .. }));
    }

    #[test]
    fn wav_goes_through_hound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Take.WAV");
        let source = AudioBuffer::new(vec![0.25, -0.5, 0.75], 16_000);
        wav::write(&path, &source, wav::WavFormat::Float32).unwrap();

        assert_eq!(load(&path).unwrap(), source);
    }
}
