//! Benchmarks for the individual compressor stages.

mod amplify;
mod detector;

pub use amplify::bench_amplify;
pub use detector::bench_detector;
