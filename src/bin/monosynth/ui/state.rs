//! State reported from the audio thread
//!
//! Copy-only so the audio callback can push it without allocating.

use monosynth::{dsp::EnvelopeStage, synth::Voice};

/// Snapshot of the voice after a callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct VoiceStatus {
    pub envelope_level: f32,
    pub stage: EnvelopeStage,
    pub frequency: f32,
    pub gate: bool,
}

impl VoiceStatus {
    pub fn of(voice: &Voice) -> Self {
        Self {
            envelope_level: voice.envelope_level(),
            stage: voice.envelope_stage(),
            frequency: voice.frequency(),
            gate: voice.gate(),
        }
    }
}
