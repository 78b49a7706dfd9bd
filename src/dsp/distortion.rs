//! Saturation / Soft Clipping
//!
//! Two places in the voice push a signal through a nonlinearity:
//!
//! 1. the filter's integrators, every sample, so resonant feedback can never
//!    run away to infinity (see `dsp/filter.rs`);
//! 2. the output stage, which drives the enveloped signal into a soft clipper
//!    so peaks round off instead of slamming into the ±1 rail.
//!
//! Both use tanh:
//!
//! ```text
//!   output = tanh(input × drive)
//!
//!    +1 ┤            ________
//!       │         .·´
//!     0 ┤       ·´
//!       │   ___·´
//!    -1 ┤‾‾‾
//! ```
//!
//! Near zero tanh(x) ≈ x, so quiet signals pass almost unchanged (times
//! `drive`). Loud signals approach ±1 asymptotically and never cross it,
//! which is why the output is "roughly [-1, 1]" rather than hard clamped.
//!
//! # Drive Values
//!
//!   1.0  = transparent for quiet signals
//!   1.5  = the voice's output stage: gentle warmth on loud notes
//!   5+   = obvious distortion

/// Output stage drive applied before master volume.
pub const OUTPUT_DRIVE: f32 = 1.5;

/// Bound a value to (-1, 1) with tanh.
#[inline]
pub fn saturate(x: f32) -> f32 {
    x.tanh()
}

/// Soft clipping using the tanh transfer function.
#[inline]
pub fn soft_clip(sample: f32, drive: f32) -> f32 {
    saturate(sample * drive)
}

/// Apply soft clipping to an entire buffer in place.
pub fn soft_clip_buffer(buffer: &mut [f32], drive: f32) {
    for sample in buffer.iter_mut() {
        *sample = soft_clip(*sample, drive);
    }
}
