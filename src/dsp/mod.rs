//! Low-level DSP primitives used by the voice.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside the voice. Each keeps its own recursive state (phase,
//! integrators, envelope stage) and is advanced sample by sample.

/// Gain stages.
pub mod amplify;
/// Sample rate and phase bookkeeping shared by the phase-driven sources.
pub mod context;
/// tanh saturation and soft clipping.
pub mod distortion;
/// Exponential attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Saturating state-variable filter with lowpass, bandpass and highpass taps.
pub mod filter;
/// Low-frequency oscillator, including sample & hold.
pub mod lfo;
/// Crossfading oscillator layers.
pub mod mix;
/// Filter cutoff modulation.
pub mod modulate;
/// White noise source.
pub mod noise;
/// Oscillator waveforms.
pub mod oscillator;

pub use context::{note_to_freq, RenderCtx};
pub use envelope::{AdsrSettings, Envelope, EnvelopeStage};
pub use filter::{FilterType, SVFilter};
pub use lfo::{Lfo, LfoWaveform};
pub use oscillator::{Oscillator, OscillatorWaveform};
