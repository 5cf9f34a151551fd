//! Benchmarks for complete `compress` calls.
//!
//! These model the request path: one pre-loaded mono buffer, default
//! parameters, output allocated per call.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};
use saavy_compressor::{compress, dsp::ThresholdMode, CompressorConfig};

use crate::test_signal;

const BUFFER_LENGTHS: &[usize] = &[44_100, 441_000];

pub fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/compress");

    let linear = CompressorConfig::default();
    let decibel = CompressorConfig::default().with_threshold_mode(ThresholdMode::Decibel);

    for &len in BUFFER_LENGTHS {
        let samples = test_signal(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("linear", len), &len, |b, _| {
            b.iter(|| compress(black_box(&samples), 44_100, &linear).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("decibel", len), &len, |b, _| {
            b.iter(|| compress(black_box(&samples), 44_100, &decibel).unwrap())
        });
    }

    group.finish();
}
