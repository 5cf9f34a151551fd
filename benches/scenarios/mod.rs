//! Whole-buffer scenario benchmarks.

mod compress;

pub use compress::bench_compress;
