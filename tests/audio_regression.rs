#![cfg(feature = "service")]

use std::path::Path;

use saavy_compressor::{
    compress,
    dsp::detector,
    io::{wav, AudioBuffer},
    request::{self, CompressRequest, OUTPUT_FILE_NAME},
    CompressorConfig, CompressorError,
};

const SAMPLE_RATE: u32 = 44_100;

fn sine(len: usize, amplitude: f32, freq: f32) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * freq * i as f32 / SAMPLE_RATE as f32;
            amplitude * phase.sin()
        })
        .collect()
}

fn write_float_wav(path: &Path, samples: &[f32]) {
    let buffer = AudioBuffer::new(samples.to_vec(), SAMPLE_RATE);
    wav::write(path, &buffer, wav::WavFormat::Float32).unwrap();
}

#[test]
fn loud_sine_is_compressed_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("loud.wav");
    let samples = sine(2048 + 300, 0.9, 441.0);
    write_float_wav(&input, &samples);

    let request = CompressRequest::from_form([
        ("threshold", "0.1"),
        ("ratio", "4"),
        ("attack_time", "1.0"),
        ("release_time", "1.0"),
        ("gain", "0"),
        ("format", "float32"),
    ])
    .unwrap();
    let response = request::handle(&request, &input, dir.path().join("output")).unwrap();

    assert_eq!(response.attachment_name, OUTPUT_FILE_NAME);
    assert_eq!(response.sample_rate, SAMPLE_RATE);
    assert_eq!(response.samples_written, 2048);

    let output = wav::load(&response.output_path).unwrap();
    assert_eq!(output.samples.len(), 2048);
    assert!(detector::rms(&output.samples) < detector::rms(&samples[..2048]));

    // Unit coefficients: each frame is scaled by its own raw reduction
    for (frame_in, frame_out) in samples[..2048]
        .chunks_exact(1024)
        .zip(output.samples.chunks_exact(1024))
    {
        let reduction = (detector::rms(frame_in) - 0.1) / 4.0;
        let multiplier = 10f32.powf(-reduction / 20.0);
        for (&a, &b) in frame_in.iter().zip(frame_out) {
            assert!((a * multiplier - b).abs() < 1e-5);
        }
    }
}

#[test]
fn silence_survives_default_request() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("silence.wav");
    write_float_wav(&input, &vec![0.0; 4096]);

    let request = CompressRequest::from_form(Vec::<(String, String)>::new()).unwrap();
    let response = request::handle(&request, &input, dir.path()).unwrap();

    let output = wav::load(&response.output_path).unwrap();
    assert_eq!(output.samples.len(), 4096);
    assert!(output.samples.iter().all(|&s| s == 0.0));
}

#[test]
fn undecodable_upload_returns_error_payload() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.wav");
    std::fs::write(&input, b"RIFF but not really").unwrap();

    let payload = request::respond(&CompressRequest::default(), &input, dir.path()).unwrap_err();
    assert_eq!(payload.status(), 500);
    assert!(payload.to_json().unwrap().starts_with("{\"error\":"));
    assert!(!dir.path().join(OUTPUT_FILE_NAME).exists());
}

#[test]
fn flac_upload_is_decoded_and_compressed() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.flac");
    std::fs::copy(
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/tone.flac"),
        &input,
    )
    .unwrap();

    let request =
        CompressRequest::from_form([("frame_size", "16"), ("format", "float32")]).unwrap();
    let response = request::handle(&request, &input, dir.path()).unwrap();

    assert_eq!(response.sample_rate, 8_000);
    assert_eq!(response.samples_written, 32);
    let output = wav::load(&response.output_path).unwrap();
    assert_eq!(output.samples.len(), 32);
    assert!(output.samples.iter().all(|s| s.is_finite()));
}

#[test]
fn invalid_frame_size_produces_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    write_float_wav(&input, &sine(2048, 0.5, 220.0));

    let mut request = CompressRequest::default();
    request.config.frame_size = 0;
    let err = request::handle(&request, &input, dir.path()).unwrap_err();

    assert!(matches!(err, CompressorError::InvalidConfig { .. }));
    assert!(!dir.path().join(OUTPUT_FILE_NAME).exists());
}

#[test]
fn concurrent_buffers_do_not_share_state() {
    let config = CompressorConfig::default().with_threshold(0.1);
    let loud = sine(8192, 0.9, 330.0);
    let expected = compress(&loud, SAMPLE_RATE, &config).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let loud = loud.clone();
            std::thread::spawn(move || compress(&loud, SAMPLE_RATE, &config).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
