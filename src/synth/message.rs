#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::synth::params::VoiceParams;

/// Control events sent from the UI thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VoiceMessage {
    /// Key down. Pitch and gate travel together so the audio side never
    /// sees a new pitch with a stale gate.
    NoteOn { frequency: f32 },
    /// Key up.
    NoteOff,
    /// Retune without touching the gate.
    SetFrequency { frequency: f32 },
    SetParameters(VoiceParams),
    /// Panic: silence immediately and zero all state.
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<VoiceMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<VoiceMessage> {
    fn pop(&mut self) -> Option<VoiceMessage> {
        Consumer::pop(self).ok()
    }
}
