//! A monophonic subtractive synthesizer voice.
//!
//! One [`synth::Voice`] owns an oscillator bank, a resonant filter, an ADSR
//! envelope and an LFO. It is driven by a target frequency and a gate, and
//! renders mono blocks on demand for an audio callback.

pub mod dsp;
pub mod patch;
pub mod synth;

/// Largest block the voice renders in one pass. Longer requests are split.
pub const MAX_BLOCK_SIZE: usize = 2048;
