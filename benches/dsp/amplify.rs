//! Benchmarks for gain application.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_compressor::dsp::amplify;

use crate::{test_signal, FRAME_SIZES};

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in FRAME_SIZES {
        let frame = test_signal(size);

        group.bench_with_input(BenchmarkId::new("apply_makeup_gain", size), &size, |b, _| {
            b.iter(|| amplify::apply_makeup_gain(black_box(&frame), black_box(-3.0), 1.5))
        });

        let mut frame_copy = frame.clone();
        group.bench_with_input(BenchmarkId::new("apply_gain", size), &size, |b, _| {
            b.iter(|| {
                frame_copy.copy_from_slice(&frame);
                amplify::apply_gain(black_box(&mut frame_copy), black_box(0.5))
            })
        });
    }

    group.finish();
}
