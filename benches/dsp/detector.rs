//! Benchmarks for RMS detection.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_compressor::dsp::{Detector, ThresholdMode};

use crate::{test_signal, FRAME_SIZES};

pub fn bench_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/detector");

    let linear = Detector::new(0.1, 4.0, ThresholdMode::Linear).unwrap();
    let decibel = Detector::new(-20.0, 4.0, ThresholdMode::Decibel).unwrap();

    for &size in FRAME_SIZES {
        let frame = test_signal(size);

        group.bench_with_input(BenchmarkId::new("linear", size), &size, |b, _| {
            b.iter(|| linear.detect(black_box(&frame)))
        });

        group.bench_with_input(BenchmarkId::new("decibel", size), &size, |b, _| {
            b.iter(|| decibel.detect(black_box(&frame)))
        });
    }

    group.finish();
}
