use std::f32::consts::TAU;

/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// Context passed to DSP primitives during rendering
///
/// Contains information about what to render:
/// - sample_rate: Audio sample rate (e.g., 44100.0)
/// - frequency: Pitch to render (Hz)
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
}

impl RenderCtx {
    /// Create context from direct frequency
    pub fn from_freq(sample_rate: f32, frequency: f32) -> Self {
        Self {
            sample_rate,
            frequency,
        }
    }

    /// Highest frequency representable at this sample rate.
    #[inline]
    pub fn nyquist(&self) -> f32 {
        self.sample_rate * 0.5
    }

    /// Radians to advance per sample for `frequency`.
    ///
    /// Negative or non-finite frequencies are treated as 0 Hz, and anything
    /// above Nyquist is held at Nyquist, so the increment is always in [0, π].
    #[inline]
    pub fn phase_increment(&self, frequency: f32) -> f32 {
        if self.sample_rate <= 0.0 {
            return 0.0;
        }
        let frequency = frequency.max(0.0).min(self.nyquist());
        TAU * frequency / self.sample_rate
    }
}

/// Advance `phase` by `increment` and wrap into [0, 2π).
#[inline]
pub(crate) fn advance_phase(phase: f32, increment: f32) -> f32 {
    let next = phase + increment;
    if next >= TAU {
        let wrapped = next - TAU;
        // f32 rounding can land exactly on TAU
        if wrapped >= TAU || wrapped < 0.0 {
            0.0
        } else {
            wrapped
        }
    } else {
        next
    }
}

/// Advance `phase` by `samples` steps of `increment` at once, wrapped into
/// [0, 2π).
#[inline]
pub(crate) fn skip_phase(phase: f32, increment: f32, samples: usize) -> f32 {
    let next = (phase + increment * samples as f32) % TAU;
    if (0.0..TAU).contains(&next) {
        next
    } else {
        0.0
    }
}
