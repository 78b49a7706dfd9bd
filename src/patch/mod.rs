//! Named presets and patch files.
//!
//! A preset only names the parameters that define its character (waveform,
//! filter, envelope, sub level). Loading one overlays those on the current
//! snapshot and leaves everything else (LFO, noise, volume, ...) as it was.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::{fmt, str::FromStr};

use crate::{dsp::OscillatorWaveform, synth::VoiceParams};

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[cfg(feature = "serde")]
    #[error("malformed patch")]
    Json(#[from] serde_json::Error),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Bass,
    Lead,
    Acid,
    Pad,
    Brass,
}

impl Preset {
    /// In keyboard order (keys 1 to 5).
    pub const ALL: [Preset; 5] = [
        Preset::Bass,
        Preset::Lead,
        Preset::Acid,
        Preset::Pad,
        Preset::Brass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Bass => "Bass",
            Preset::Lead => "Lead",
            Preset::Acid => "Acid",
            Preset::Pad => "Pad",
            Preset::Brass => "Brass",
        }
    }

    /// Overlay this preset on `params`.
    pub fn apply_to(self, params: &mut VoiceParams) {
        use OscillatorWaveform::{Sawtooth, Square};

        // (waveform, cutoff, resonance, attack, decay, sustain, release, env amount, sub)
        let (waveform, cutoff, resonance, attack, decay, sustain, release, env_amount, sub) =
            match self {
                Preset::Bass => (Sawtooth, 800.0, 1.2, 0.01, 0.4, 0.3, 0.2, 1.5, 0.5),
                Preset::Lead => (Square, 3000.0, 0.5, 0.05, 0.3, 0.7, 0.3, 0.8, 0.0),
                Preset::Acid => (Square, 500.0, 2.0, 0.01, 0.2, 0.0, 0.1, 2.0, 0.0),
                Preset::Pad => (Sawtooth, 1500.0, 0.3, 0.8, 0.5, 0.8, 1.5, 0.3, 0.3),
                Preset::Brass => (Sawtooth, 2500.0, 0.8, 0.1, 0.4, 0.6, 0.3, 1.0, 0.2),
            };

        params.waveform = waveform;
        params.cutoff_hz = cutoff;
        params.resonance = resonance;
        params.attack = attack;
        params.decay = decay;
        params.sustain = sustain;
        params.release = release;
        params.filter_env_amount = env_amount;
        params.sub_level = sub;

        log::debug!("loaded preset {}", self.name());
    }

    /// This preset on top of the default snapshot.
    pub fn params(self) -> VoiceParams {
        let mut params = VoiceParams::default();
        self.apply_to(&mut params);
        params
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PatchError::UnknownPreset(s.to_string()))
    }
}

/// Parse a full snapshot from JSON. Missing fields take their defaults and
/// every value is clamped to its range.
#[cfg(feature = "serde")]
pub fn from_json(json: &str) -> Result<VoiceParams, PatchError> {
    let params: VoiceParams = serde_json::from_str(json)?;
    log::debug!("loaded patch from json");
    Ok(params.sanitized())
}

#[cfg(feature = "serde")]
pub fn to_json(params: &VoiceParams) -> Result<String, PatchError> {
    Ok(serde_json::to_string_pretty(params)?)
}
