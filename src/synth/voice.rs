use crate::{
    dsp::{
        amplify, distortion, mix, modulate, noise::WhiteNoise, AdsrSettings, Envelope,
        EnvelopeStage, Lfo, Oscillator, OscillatorWaveform, RenderCtx, SVFilter,
    },
    synth::params::VoiceParams,
    MAX_BLOCK_SIZE,
};

/// The single sounding voice.
///
/// Per block the chain is:
///
/// ```text
///   oscillator ─┬─ crossfade sub ── crossfade noise ── filter ── × envelope ── tanh ── × volume
///               │                                        ↑
///   lfo ── cutoff = base · (1 + lfo·depth) · (1 + env·amount)
/// ```
///
/// The voice owns every piece of recursive state (phases, filter
/// integrators, envelope) and all scratch buffers, so `render` never
/// allocates. It is created once and reused for every note.
pub struct Voice {
    sample_rate: f32,
    frequency: f32,
    gate: bool,
    params: VoiceParams,

    oscillator: Oscillator,
    sub_oscillator: Oscillator,
    noise: WhiteNoise,
    lfo: Lfo,
    filter: SVFilter,
    envelope: Envelope,

    layer_buffer: Vec<f32>,
    cutoff_buffer: Vec<f32>,
    envelope_buffer: Vec<f32>,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Self {
        let params = VoiceParams::default();
        let mut filter = SVFilter::new(params.filter_type);
        filter.cutoff_hz = params.cutoff_hz;
        filter.resonance = params.resonance;

        Self {
            // a non-positive rate would turn every coefficient into NaN
            sample_rate: if sample_rate >= 1.0 { sample_rate } else { 1.0 },
            frequency: 0.0,
            gate: false,
            params,

            oscillator: Oscillator::with_seed(0x1234_5678),
            sub_oscillator: Oscillator::with_seed(0x8765_4321),
            noise: WhiteNoise::with_seed(0x2545_F491),
            lfo: Lfo::new(),
            filter,
            envelope: Envelope::new(),

            layer_buffer: vec![0.0; MAX_BLOCK_SIZE],
            cutoff_buffer: vec![0.0; MAX_BLOCK_SIZE],
            envelope_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Change pitch without touching the gate (glide-free legato).
    pub fn set_frequency(&mut self, frequency: f32) {
        // NaN and negative map to 0 Hz
        self.frequency = frequency.max(0.0);
    }

    /// Raise or drop the gate. Raising it from idle or release starts Attack;
    /// dropping it starts Release on the next sample.
    pub fn set_gate(&mut self, gate: bool) {
        self.gate = gate;
    }

    /// Key down: new pitch and gate together, re-striking the envelope from
    /// its current level even when a key is already held.
    pub fn note_on(&mut self, frequency: f32) {
        self.set_frequency(frequency);
        self.gate = true;
        self.envelope.retrigger();
    }

    /// Key up: release from wherever the envelope is.
    pub fn note_off(&mut self) {
        self.gate = false;
    }

    /// Take a new parameter snapshot. Values are clamped to their ranges.
    pub fn set_parameters(&mut self, params: &VoiceParams) {
        self.params = params.sanitized();
        self.filter.cutoff_hz = self.params.cutoff_hz;
        self.filter.resonance = self.params.resonance;
        self.filter.set_filter_type(self.params.filter_type);
    }

    /// Back to power-on state: silent, gate low, every phase and integrator
    /// zeroed. The parameter snapshot is kept.
    pub fn reset(&mut self) {
        self.frequency = 0.0;
        self.gate = false;
        self.oscillator.reset();
        self.sub_oscillator.reset();
        self.lfo.reset();
        self.filter.reset();
        self.envelope.reset();
    }

    /// True while the key is held or a release tail is still sounding.
    pub fn is_active(&self) -> bool {
        self.gate || self.envelope.is_active()
    }

    /// Fill `out` with the next `out.len()` samples.
    ///
    /// An idle voice writes silence without running the chain. Phases keep
    /// running either way.
    pub fn render(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            if self.is_active() {
                self.render_chunk(chunk);
            } else {
                chunk.fill(0.0);
                self.advance_idle(chunk.len());
            }
        }
    }

    fn advance_idle(&mut self, len: usize) {
        let p = self.params;
        let ctx = RenderCtx::from_freq(self.sample_rate, self.frequency);
        self.oscillator.advance(len, &ctx, p.waveform, p.detune_cents);
        self.sub_oscillator
            .advance(len, &ctx, OscillatorWaveform::Sub, 0.0);
        self.lfo
            .advance(len, p.lfo_rate, p.lfo_waveform, self.sample_rate);
    }

    fn render_chunk(&mut self, out: &mut [f32]) {
        let len = out.len();
        let p = self.params;
        let ctx = RenderCtx::from_freq(self.sample_rate, self.frequency);

        // 1. main oscillator
        self.oscillator
            .render(out, &ctx, p.waveform, p.pulse_width, p.detune_cents);

        // 2-3. sub-oscillator and noise layers
        let layer = &mut self.layer_buffer[..len];
        if p.sub_level > 0.0 {
            self.sub_oscillator
                .render(layer, &ctx, OscillatorWaveform::Sub, 0.5, 0.0);
            mix::crossfade_in_place(out, layer, p.sub_level);
        } else {
            self.sub_oscillator
                .advance(len, &ctx, OscillatorWaveform::Sub, 0.0);
        }
        if p.noise_level > 0.0 {
            for sample in layer.iter_mut() {
                *sample = self.noise.next_bipolar();
            }
            mix::crossfade_in_place(out, layer, p.noise_level);
        }

        // 4. modulated cutoff, envelope taken at block start
        let cutoff = &mut self.cutoff_buffer[..len];
        if p.lfo_rate > 0.0 && p.lfo_depth > 0.0 {
            self.lfo
                .render(cutoff, p.lfo_rate, p.lfo_waveform, self.sample_rate);
        } else {
            self.lfo
                .advance(len, p.lfo_rate, p.lfo_waveform, self.sample_rate);
            cutoff.fill(0.0);
        }
        modulate::cutoff_block(
            cutoff,
            p.cutoff_hz,
            p.lfo_depth,
            self.envelope.level(),
            p.filter_env_amount,
        );

        // 5. filter
        self.filter.render_modulated(out, cutoff, self.sample_rate);

        // 6. amplitude envelope
        let envelope = &mut self.envelope_buffer[..len];
        let adsr: AdsrSettings = p.adsr();
        self.envelope
            .render(envelope, self.gate, &adsr, self.sample_rate);
        amplify::multiply_in_place(out, envelope);

        // 7. output stage
        distortion::soft_clip_buffer(out, distortion::OUTPUT_DRIVE);
        amplify::apply_gain(out, p.volume);
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn gate(&self) -> bool {
        self.gate
    }

    pub fn params(&self) -> &VoiceParams {
        &self.params
    }

    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }

    pub fn envelope_stage(&self) -> EnvelopeStage {
        self.envelope.stage()
    }

    pub fn oscillator_phase(&self) -> f32 {
        self.oscillator.phase()
    }

    pub fn sub_oscillator_phase(&self) -> f32 {
        self.sub_oscillator.phase()
    }

    pub fn lfo_phase(&self) -> f32 {
        self.lfo.phase()
    }

    /// Filter integrators as (low, band).
    pub fn filter_state(&self) -> (f32, f32) {
        self.filter.state()
    }
}
