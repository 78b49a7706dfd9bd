/*
ADSR Envelope
=============

A four-stage envelope generator driven by a gate. Its output (0.0 to 1.0)
is the voice's amplifier level and one of the filter cutoff modulators.

Vocabulary
----------

  level       The current output value, always within [0.0, 1.0].

  stage       Off, Attack, Decay, Sustain or Release.

  gate        true while a key is held. Evaluated every sample.

  elapsed     Samples spent in the current stage. Counted BEFORE the level
              is computed, so a stage of N samples lands exactly on its
              target at its Nth sample.

  start       The level captured when Attack or Release began. Both stages
              leave from wherever the envelope was, never from a fixed
              value, so there is no click when a key is re-struck or
              released early.


The Shape: Normalized Exponential
---------------------------------

Every segment uses the same curve family, k = 5 over the segment's progress
p = elapsed / total (0 → 1):

    rise(p) = (1 − e^(−5p)) / (1 − e^(−5))      0 → 1, fast start
    fall(p) = (e^(−5p) − e^(−5)) / (1 − e^(−5)) 1 → 0, fast start

  Level
    1.0 ┐   .-‾‾-.
        │  /      `-.___________
    S   │ /                     `.
        │/                        `-.
    0.0 └──────────────────────────────`──→ Time
        Attack Decay   Sustain   Release

Dividing by (1 − e^(−5)) makes the curves reach their target exactly at
p = 1. A bare e^(−5p) stops at 0.0067 of the distance, which would leave a
release hanging above the 0.001 silence floor when its time is up.

    Attack   level = start + (1 − start) · rise(p)
    Decay    level = sustain + (1 − sustain) · fall(p)
    Release  level = start · fall(p)


The State Machine
-----------------

                gate on                 p = 1               p = 1
    ┌─────┐ ─────────────→ ┌────────┐ ──────→ ┌───────┐ ──────→ ┌─────────┐
    │ Off │                │ Attack │         │ Decay │         │ Sustain │
    └─────┘ ←──┐           └────────┘         └───────┘         └─────────┘
               │              ↑    │ gate off     │ gate off        │ gate off
               │     gate on  │    ↓              ↓                 ↓
               │            ┌─────────────────────────────────────────┐
               └─────────── │                 Release                 │
        p = 1 or ≤ 0.001    └─────────────────────────────────────────┘

  - gate on in Off or Release starts a new Attack from the current level.
  - gate off in Attack, Decay or Sustain captures the level and releases.
  - Sustain re-reads the sustain setting every sample.
  - A stage with duration ≤ 0 (or shorter than one sample) completes in
    the same sample it is entered.

A monophonic player also re-strikes the envelope when a new key goes down
while the old one is still held. The gate never drops in that case, so the
voice calls `retrigger()` explicitly.
*/

/// Curve steepness shared by every segment.
const CURVE: f32 = 5.0;

/// Release completes once the level falls to or below this value.
pub const RELEASE_FLOOR: f32 = 0.001;

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeStage {
    #[default]
    Off,
    Attack,
    Decay,
    Sustain,
    Release,
}

impl EnvelopeStage {
    pub fn name(self) -> &'static str {
        match self {
            EnvelopeStage::Off => "Off",
            EnvelopeStage::Attack => "Attack",
            EnvelopeStage::Decay => "Decay",
            EnvelopeStage::Sustain => "Sustain",
            EnvelopeStage::Release => "Release",
        }
    }
}

/// Envelope times in seconds and the sustain level.
///
/// Read fresh every sample, so changes apply to a stage already running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrSettings {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl AdsrSettings {
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Sustain clamped to [0, 1]; NaN reads as 0.
    #[inline]
    pub fn sustain_level(&self) -> f32 {
        self.sustain.max(0.0).min(1.0)
    }
}

impl Default for AdsrSettings {
    fn default() -> Self {
        Self::new(0.01, 0.3, 0.6, 0.5)
    }
}

#[inline]
fn rise(progress: f32) -> f32 {
    (1.0 - (-CURVE * progress).exp()) / (1.0 - (-CURVE).exp())
}

#[inline]
fn fall(progress: f32) -> f32 {
    ((-CURVE * progress).exp() - (-CURVE).exp()) / (1.0 - (-CURVE).exp())
}

/// Length of a stage in whole samples. Zero means "complete immediately".
#[inline]
fn stage_samples(seconds: f32, sample_rate: f32) -> u32 {
    let samples = (seconds * sample_rate).round();
    // NaN fails the comparison
    if samples >= 1.0 {
        samples as u32
    } else {
        0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Envelope {
    stage: EnvelopeStage,
    level: f32,
    elapsed: u32,
    // level captured when Attack or Release began
    start_level: f32,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one sample and return the new level.
    pub fn next_sample(&mut self, gate: bool, settings: &AdsrSettings, sample_rate: f32) -> f32 {
        match (gate, self.stage) {
            (true, EnvelopeStage::Off | EnvelopeStage::Release) => self.retrigger(),
            (false, EnvelopeStage::Attack | EnvelopeStage::Decay | EnvelopeStage::Sustain) => {
                self.enter(EnvelopeStage::Release);
            }
            _ => {}
        }

        self.advance(settings, sample_rate);
        self.level = self.level.max(0.0).min(1.0);
        self.level
    }

    /// Fill `buffer` with one level per sample.
    pub fn render(
        &mut self,
        buffer: &mut [f32],
        gate: bool,
        settings: &AdsrSettings,
        sample_rate: f32,
    ) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(gate, settings, sample_rate);
        }
    }

    /// Start a fresh Attack from the current level.
    pub fn retrigger(&mut self) {
        self.enter(EnvelopeStage::Attack);
    }

    fn enter(&mut self, stage: EnvelopeStage) {
        self.stage = stage;
        self.elapsed = 0;
        self.start_level = self.level;
    }

    fn advance(&mut self, settings: &AdsrSettings, sample_rate: f32) {
        // Zero-length stages fall through to the next one within this sample.
        loop {
            match self.stage {
                EnvelopeStage::Off => {
                    self.level = 0.0;
                    return;
                }

                EnvelopeStage::Attack => {
                    let total = stage_samples(settings.attack, sample_rate);
                    self.elapsed = self.elapsed.saturating_add(1);
                    if self.elapsed >= total {
                        self.level = 1.0;
                        self.enter(EnvelopeStage::Decay);
                        if total == 0 {
                            continue;
                        }
                    } else {
                        let p = self.elapsed as f32 / total as f32;
                        self.level = self.start_level + (1.0 - self.start_level) * rise(p);
                    }
                    return;
                }

                EnvelopeStage::Decay => {
                    let sustain = settings.sustain_level();
                    let total = stage_samples(settings.decay, sample_rate);
                    self.elapsed = self.elapsed.saturating_add(1);
                    if self.elapsed >= total {
                        self.level = sustain;
                        self.enter(EnvelopeStage::Sustain);
                        if total == 0 {
                            continue;
                        }
                    } else {
                        let p = self.elapsed as f32 / total as f32;
                        self.level = sustain + (1.0 - sustain) * fall(p);
                    }
                    return;
                }

                EnvelopeStage::Sustain => {
                    self.level = settings.sustain_level();
                    return;
                }

                EnvelopeStage::Release => {
                    let total = stage_samples(settings.release, sample_rate);
                    self.elapsed = self.elapsed.saturating_add(1);
                    if self.elapsed < total {
                        let p = self.elapsed as f32 / total as f32;
                        self.level = self.start_level * fall(p);
                    }
                    if self.elapsed >= total || self.level <= RELEASE_FLOOR {
                        self.level = 0.0;
                        self.enter(EnvelopeStage::Off);
                    }
                    return;
                }
            }
        }
    }

    /// True until Release has run out.
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Off
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}
