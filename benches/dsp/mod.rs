//! Benchmarks for low-level DSP primitives.

mod amplify;
mod distortion;
mod envelope;
mod filter;
mod lfo;
mod oscillator;

pub use amplify::bench_amplify;
pub use distortion::bench_distortion;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use lfo::bench_lfo;
pub use oscillator::bench_oscillator;
