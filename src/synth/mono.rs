#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

#[cfg(feature = "rtrb")]
use crate::synth::params::VoiceParams;
use crate::synth::{
    message::{MessageReceiver, VoiceMessage},
    voice::Voice,
};

/// Errors from the control side. The audio side has none.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("control queue is full, dropped {0:?}")]
    QueueFull(VoiceMessage),
    #[error("audio side has gone away")]
    Disconnected,
}

/// A [`Voice`] fed by a message queue.
///
/// Lives on the audio thread. Every `render_block` first drains whatever the
/// control side sent, in order, then renders the block with the result.
pub struct MonoSynth<R: MessageReceiver> {
    voice: Voice,
    rx: R,
}

impl<R: MessageReceiver> MonoSynth<R> {
    pub fn new(sample_rate: f32, rx: R) -> Self {
        Self {
            voice: Voice::new(sample_rate),
            rx,
        }
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(msg) = self.rx.pop() {
            match msg {
                VoiceMessage::NoteOn { frequency } => self.voice.note_on(frequency),
                VoiceMessage::NoteOff => self.voice.note_off(),
                VoiceMessage::SetFrequency { frequency } => self.voice.set_frequency(frequency),
                VoiceMessage::SetParameters(params) => self.voice.set_parameters(&params),
                VoiceMessage::Reset => self.voice.reset(),
            }
        }

        self.voice.render(out);
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }
}

#[cfg(feature = "rtrb")]
impl MonoSynth<Consumer<VoiceMessage>> {
    /// Build the audio-side synth and its control handle around a queue of
    /// `capacity` messages.
    pub fn with_queue(sample_rate: f32, capacity: usize) -> (Self, SynthController) {
        let (tx, rx) = RingBuffer::new(capacity);
        (Self::new(sample_rate, rx), SynthController { tx })
    }
}

/// Producer side of the control queue, held by the UI thread.
#[cfg(feature = "rtrb")]
pub struct SynthController {
    tx: Producer<VoiceMessage>,
}

#[cfg(feature = "rtrb")]
impl SynthController {
    pub fn send(&mut self, msg: VoiceMessage) -> Result<(), ControlError> {
        if self.tx.is_abandoned() {
            return Err(ControlError::Disconnected);
        }
        self.tx.push(msg).map_err(|rtrb::PushError::Full(msg)| {
            log::warn!("control queue full, dropping {msg:?}");
            ControlError::QueueFull(msg)
        })
    }

    pub fn note_on(&mut self, frequency: f32) -> Result<(), ControlError> {
        self.send(VoiceMessage::NoteOn { frequency })
    }

    pub fn note_off(&mut self) -> Result<(), ControlError> {
        self.send(VoiceMessage::NoteOff)
    }

    pub fn set_frequency(&mut self, frequency: f32) -> Result<(), ControlError> {
        self.send(VoiceMessage::SetFrequency { frequency })
    }

    pub fn set_parameters(&mut self, params: &VoiceParams) -> Result<(), ControlError> {
        self.send(VoiceMessage::SetParameters(*params))
    }

    pub fn reset(&mut self) -> Result<(), ControlError> {
        self.send(VoiceMessage::Reset)
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

#[cfg(all(test, feature = "rtrb"))]
mod tests {
    use super::*;
    use crate::dsp::EnvelopeStage;

    #[test]
    fn messages_apply_before_rendering() {
        let (mut synth, mut ctl) = MonoSynth::with_queue(48_000.0, 16);
        ctl.note_on(440.0).unwrap();

        let mut out = [0.0; 128];
        synth.render_block(&mut out);

        assert!(synth.voice().gate());
        assert_eq!(synth.voice().frequency(), 440.0);
        assert!(out.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn messages_apply_in_order() {
        let (mut synth, mut ctl) = MonoSynth::with_queue(48_000.0, 16);
        ctl.note_on(440.0).unwrap();
        let mut out = [0.0; 64];
        synth.render_block(&mut out);

        ctl.set_frequency(220.0).unwrap();
        ctl.note_off().unwrap();
        synth.render_block(&mut out);

        assert!(!synth.voice().gate());
        assert_eq!(synth.voice().frequency(), 220.0);
        assert_eq!(synth.voice().envelope_stage(), EnvelopeStage::Release);
    }

    #[test]
    fn note_on_and_off_in_one_block_ends_silent() {
        // both land before the first sample, so release starts from zero
        let (mut synth, mut ctl) = MonoSynth::with_queue(48_000.0, 16);
        ctl.note_on(440.0).unwrap();
        ctl.note_off().unwrap();

        let mut out = [0.0; 64];
        synth.render_block(&mut out);

        assert_eq!(synth.voice().envelope_stage(), EnvelopeStage::Off);
        assert!(!synth.voice().is_active());
    }

    #[test]
    fn parameters_reach_the_voice() {
        let (mut synth, mut ctl) = MonoSynth::with_queue(48_000.0, 4);
        let params = VoiceParams {
            cutoff_hz: 500.0,
            ..VoiceParams::default()
        };
        ctl.set_parameters(&params).unwrap();
        synth.render_block(&mut [0.0; 16]);
        assert_eq!(synth.voice().params().cutoff_hz, 500.0);
    }

    #[test]
    fn full_queue_reports_dropped_message() {
        let (_synth, mut ctl) = MonoSynth::with_queue(48_000.0, 1);
        ctl.note_off().unwrap();
        assert_eq!(ctl.slots(), 0);

        match ctl.note_on(330.0) {
            Err(ControlError::QueueFull(VoiceMessage::NoteOn { frequency })) => {
                assert_eq!(frequency, 330.0)
            }
            other => panic!("expected a full queue, got {other:?}"),
        }
    }

    #[test]
    fn dropped_synth_disconnects_controller() {
        let (synth, mut ctl) = MonoSynth::with_queue(48_000.0, 4);
        drop(synth);
        assert!(matches!(ctl.reset(), Err(ControlError::Disconnected)));
    }

    #[test]
    fn reset_silences_a_held_note() {
        let (mut synth, mut ctl) = MonoSynth::with_queue(48_000.0, 4);
        ctl.note_on(440.0).unwrap();
        synth.render_block(&mut [0.0; 256]);

        ctl.reset().unwrap();
        let mut out = [1.0; 256];
        synth.render_block(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert!(!synth.voice().is_active());
    }
}
