//! Real-world scenario benchmarks.
//!
//! These render the complete voice the way the audio callback does, one
//! block at a time, under the built-in presets.

mod voice;

pub use voice::bench_voice;
