#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::ops::RangeInclusive;

use crate::dsp::{
    oscillator::{MAX_PULSE_WIDTH, MIN_PULSE_WIDTH},
    AdsrSettings, FilterType, LfoWaveform, OscillatorWaveform,
};

pub const PULSE_WIDTH_RANGE: RangeInclusive<f32> = MIN_PULSE_WIDTH..=MAX_PULSE_WIDTH;
/// Detune units, see [`crate::dsp::oscillator::detuned_frequency`].
pub const DETUNE_RANGE: RangeInclusive<f32> = -50.0..=50.0;
pub const LEVEL_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const CUTOFF_RANGE: RangeInclusive<f32> = 20.0..=20_000.0;
pub const RESONANCE_RANGE: RangeInclusive<f32> = 0.0..=4.0;
pub const ENV_AMOUNT_RANGE: RangeInclusive<f32> = 0.0..=3.0;
pub const ATTACK_RANGE: RangeInclusive<f32> = 0.001..=2.0;
pub const DECAY_RANGE: RangeInclusive<f32> = 0.001..=2.0;
pub const RELEASE_RANGE: RangeInclusive<f32> = 0.001..=3.0;
pub const LFO_RATE_RANGE: RangeInclusive<f32> = 0.0..=20.0;

/// Everything the panel controls, as one snapshot.
///
/// The voice reads a copy at the start of every block. Values outside their
/// range are clamped where they are used; [`VoiceParams::sanitized`] clamps
/// the whole snapshot up front.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParams {
    // oscillator
    pub waveform: OscillatorWaveform,
    pub pulse_width: f32,
    pub detune_cents: f32,
    pub sub_level: f32,
    pub noise_level: f32,

    // filter
    pub cutoff_hz: f32,
    pub resonance: f32,
    pub filter_type: FilterType,
    pub filter_env_amount: f32,

    // envelope
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,

    // lfo
    pub lfo_rate: f32,
    pub lfo_depth: f32,
    pub lfo_waveform: LfoWaveform,

    pub volume: f32,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            waveform: OscillatorWaveform::Sawtooth,
            pulse_width: 0.5,
            detune_cents: 0.0,
            sub_level: 0.3,
            noise_level: 0.0,

            cutoff_hz: 2000.0,
            resonance: 0.7,
            filter_type: FilterType::LowPass,
            filter_env_amount: 0.5,

            attack: 0.01,
            decay: 0.3,
            sustain: 0.6,
            release: 0.5,

            lfo_rate: 5.0,
            lfo_depth: 0.3,
            lfo_waveform: LfoWaveform::Sine,

            volume: 0.25,
        }
    }
}

/// Clamp into `range`; NaN becomes `fallback`.
#[inline]
pub(crate) fn clamp_or(value: f32, range: &RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.max(*range.start()).min(*range.end())
    }
}

impl VoiceParams {
    /// Copy with every field clamped to its documented range.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            waveform: self.waveform,
            pulse_width: clamp_or(self.pulse_width, &PULSE_WIDTH_RANGE, d.pulse_width),
            detune_cents: clamp_or(self.detune_cents, &DETUNE_RANGE, d.detune_cents),
            sub_level: clamp_or(self.sub_level, &LEVEL_RANGE, d.sub_level),
            noise_level: clamp_or(self.noise_level, &LEVEL_RANGE, d.noise_level),

            cutoff_hz: clamp_or(self.cutoff_hz, &CUTOFF_RANGE, d.cutoff_hz),
            resonance: clamp_or(self.resonance, &RESONANCE_RANGE, d.resonance),
            filter_type: self.filter_type,
            filter_env_amount: clamp_or(self.filter_env_amount, &ENV_AMOUNT_RANGE, d.filter_env_amount),

            attack: clamp_or(self.attack, &ATTACK_RANGE, d.attack),
            decay: clamp_or(self.decay, &DECAY_RANGE, d.decay),
            sustain: clamp_or(self.sustain, &LEVEL_RANGE, d.sustain),
            release: clamp_or(self.release, &RELEASE_RANGE, d.release),

            lfo_rate: clamp_or(self.lfo_rate, &LFO_RATE_RANGE, d.lfo_rate),
            lfo_depth: clamp_or(self.lfo_depth, &LEVEL_RANGE, d.lfo_depth),
            lfo_waveform: self.lfo_waveform,

            volume: clamp_or(self.volume, &LEVEL_RANGE, d.volume),
        }
    }

    pub fn adsr(&self) -> AdsrSettings {
        AdsrSettings::new(self.attack, self.decay, self.sustain, self.release)
    }
}
