//! Filter cutoff modulation.

/*
Multiplicative Modulation
=========================

Two sources move the filter cutoff: the LFO (bipolar, −1..+1) and the
amplitude envelope (unipolar, 0..1). Both scale the base cutoff rather than
adding Hz to it:

    cutoff = base × (1 + lfo × lfo_depth) × (1 + env × env_amount)

Scaling keeps the sweep musically even: a depth of 0.3 moves the cutoff
±30% whether the base is 200 Hz or 5 kHz, which is roughly the same
interval either way. An additive depth in Hz would wobble a low cutoff by
octaves and barely move a high one.

The two factors compound. With base 2000 Hz, lfo_depth 0.3 and
env_amount 0.5:

    lfo = +1, env = 1.0   →  2000 × 1.3 × 1.5 = 3900 Hz
    lfo = −1, env = 0.0   →  2000 × 0.7 × 1.0 = 1400 Hz

A depth above 1.0 can push the LFO factor negative. No clamping happens
here; the filter clamps whatever arrives to [20 Hz, Nyquist − 100 Hz].


Rate
----

The LFO factor is applied per sample. The envelope factor uses the
envelope level at the START of the block: the envelope runs after the
filter in the chain, so the filter sees the level the previous block ended
on. At typical block sizes that is a few milliseconds of lag on a
modulation that moves over tens of milliseconds.
*/

/// Cutoff after LFO and envelope modulation.
#[inline]
pub fn modulated_cutoff(
    base_cutoff: f32,
    lfo: f32,
    lfo_depth: f32,
    envelope_level: f32,
    envelope_amount: f32,
) -> f32 {
    base_cutoff * (1.0 + lfo * lfo_depth) * (1.0 + envelope_level * envelope_amount)
}

/// Turn a block of LFO samples into per-sample cutoff values in place.
#[inline]
pub fn cutoff_block(
    lfo_to_cutoff: &mut [f32],
    base_cutoff: f32,
    lfo_depth: f32,
    envelope_level: f32,
    envelope_amount: f32,
) {
    for value in lfo_to_cutoff.iter_mut() {
        *value = modulated_cutoff(base_cutoff, *value, lfo_depth, envelope_level, envelope_amount);
    }
}
