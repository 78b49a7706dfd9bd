// Purpose: the monophonic voice and its control surface
// This layer sits above the dsp primitives and composes them into one voice

pub mod message;
pub mod mono;
pub mod params;
pub mod voice;

pub use message::{MessageReceiver, VoiceMessage};
#[cfg(feature = "rtrb")]
pub use mono::SynthController;
pub use mono::{ControlError, MonoSynth};
pub use params::VoiceParams;
pub use voice::Voice;
