use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::distortion::saturate;

/*
Resonant State-Variable Filter
==============================

| type       | output tap | passes          | rejects         |
| ---------- | ---------- | --------------- | --------------- |
| low-pass   | low        | below cutoff    | above cutoff    |
| band-pass  | band       | around cutoff   | far from cutoff |
| high-pass  | high       | above cutoff    | below cutoff    |

Topology
--------

Two integrators in a loop (the Chamberlin form). Per sample:

    f    = 2·sin(π·cutoff / sample_rate)
    low  = low + f·band
    high = input − low − q·band
    band = f·high + band

`low` and `band` are the only memory. All three outputs come out of the
same recursion, so switching taps never needs a different filter.

`q` is damping: it subtracts band energy from the feedback path. Small q
means little damping and a sharp resonant peak; at q = 0 the loop is
lossless and rings at the cutoff frequency indefinitely.


Keeping the recursion finite
----------------------------

At low damping and high cutoff the Chamberlin loop has gain above 1 and
will blow up to ±inf, then NaN, within a few samples. Because the state
persists across blocks, one NaN would poison every future sample.

Two guards:

  1. cutoff is clamped to [20 Hz, sample_rate/2 − 100 Hz] and q to [0, 4]
     before use, keeping f inside the range the topology tolerates.
  2. both integrator states pass through tanh every sample. That bounds
     them to (−1, 1) whatever the coefficients do, and doubles as a warm
     saturation of the resonant peak.

With the states bounded, `high` is bounded too (|input| + 1 + 4·1), so
every output is finite for any finite input.
*/

pub const MIN_CUTOFF_HZ: f32 = 20.0;
/// Distance kept between the cutoff and Nyquist.
pub const NYQUIST_MARGIN_HZ: f32 = 100.0;
pub const MAX_RESONANCE: f32 = 4.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    #[default]
    LowPass,
    BandPass,
    HighPass,
}

impl FilterType {
    pub const ALL: [FilterType; 3] = [FilterType::LowPass, FilterType::BandPass, FilterType::HighPass];

    pub fn name(self) -> &'static str {
        match self {
            FilterType::LowPass => "Lowpass",
            FilterType::BandPass => "Bandpass",
            FilterType::HighPass => "Highpass",
        }
    }
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

impl FilterOutputs {
    #[inline]
    pub fn select(&self, filter_type: FilterType) -> f32 {
        match filter_type {
            FilterType::LowPass => self.lowpass,
            FilterType::BandPass => self.bandpass,
            FilterType::HighPass => self.highpass,
        }
    }
}

/// Clamp a cutoff into the stable range for `sample_rate`.
///
/// NaN maps to the minimum cutoff.
#[inline]
pub fn clamp_cutoff(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let max = (sample_rate * 0.5 - NYQUIST_MARGIN_HZ).max(MIN_CUTOFF_HZ);
    cutoff_hz.max(MIN_CUTOFF_HZ).min(max)
}

/// Clamp resonance (damping) into [0, MAX_RESONANCE]. NaN maps to 0.
#[inline]
pub fn clamp_resonance(resonance: f32) -> f32 {
    resonance.max(0.0).min(MAX_RESONANCE)
}

/// Frequency coefficient `f` for a cutoff.
#[inline]
pub fn coefficient(cutoff_hz: f32, sample_rate: f32) -> f32 {
    2.0 * (PI * clamp_cutoff(cutoff_hz, sample_rate) / sample_rate).sin()
}

pub struct SVFilter {
    low: f32,  // first integrator's memory
    band: f32, // second integrator's memory

    pub cutoff_hz: f32,
    pub resonance: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType) -> Self {
        Self {
            low: 0.0,
            band: 0.0,
            cutoff_hz: 1000.0,
            resonance: 0.7,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            cutoff_hz,
            ..Self::new(FilterType::LowPass)
        }
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            cutoff_hz,
            ..Self::new(FilterType::HighPass)
        }
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self {
            cutoff_hz,
            ..Self::new(FilterType::BandPass)
        }
    }

    /// One step of the recursion. `f` comes from [`coefficient`], `q` from
    /// [`clamp_resonance`].
    #[inline]
    pub fn next_sample(&mut self, sample: f32, f: f32, q: f32) -> FilterOutputs {
        let low = self.low + f * self.band;
        let high = sample - low - q * self.band;
        let band = f * high + self.band;

        self.low = saturate(low);
        self.band = saturate(band);

        FilterOutputs {
            lowpass: self.low,
            bandpass: self.band,
            highpass: high,
        }
    }

    /// Filter `buffer` in place at the fixed `cutoff_hz`.
    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let f = coefficient(self.cutoff_hz, sample_rate);
        let q = clamp_resonance(self.resonance);
        let filter_type = self.filter_type;

        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, f, q).select(filter_type);
        }
    }

    /// Filter `buffer` in place with a per-sample cutoff.
    ///
    /// `cutoff_hz` must be at least as long as `buffer`.
    pub fn render_modulated(&mut self, buffer: &mut [f32], cutoff_hz: &[f32], sample_rate: f32) {
        debug_assert!(cutoff_hz.len() >= buffer.len());
        let q = clamp_resonance(self.resonance);
        let filter_type = self.filter_type;

        for (sample, &cutoff) in buffer.iter_mut().zip(cutoff_hz.iter()) {
            let f = coefficient(cutoff, sample_rate);
            *sample = self.next_sample(*sample, f, q).select(filter_type);
        }
    }

    pub fn reset(&mut self) {
        self.low = 0.0;
        self.band = 0.0;
    }

    /// Current (low, band) integrator state.
    pub fn state(&self) -> (f32, f32) {
        (self.low, self.band)
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance;
    }

    pub fn set_filter_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }
}
