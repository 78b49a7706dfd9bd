//! Oscillator mixing.

/*
Crossfading Sources
===================

The voice has one main oscillator and two optional layers, the
sub-oscillator and white noise. Each layer is blended in with a linear
crossfade controlled by its level:

    mixed = main × (1 − level) + layer × level

      level = 0.0  →  main only (the layer isn't even rendered)
      level = 0.5  →  equal parts
      level = 1.0  →  layer only

The weights always sum to 1.0, so two full-scale sources can never add up
past ±1.0 and the filter sees the same headroom whatever the mix. The
catch is that the main oscillator gets quieter as a layer comes in; that is
the behaviour of the hardware panel this voice imitates, where the mixer
sliders trade one source against another.

Layers are applied one after another, so the noise crossfade also scales
down whatever sub-oscillator was mixed in before it:

    (main·(1−s) + sub·s)·(1−n) + noise·n
*/

/// Crossfade `layer` into `main` in place.
///
/// `level` is clamped to [0.0, 1.0].
#[inline]
pub fn crossfade_in_place(main: &mut [f32], layer: &[f32], level: f32) {
    debug_assert_eq!(main.len(), layer.len());

    let level = level.max(0.0).min(1.0);
    let keep = 1.0 - level;

    for (m, &l) in main.iter_mut().zip(layer.iter()) {
        *m = *m * keep + l * level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_level_keeps_main() {
        let mut main = [1.0, 0.5, -0.5, -1.0];
        crossfade_in_place(&mut main, &[0.0; 4], 0.0);
        assert_eq!(main, [1.0, 0.5, -0.5, -1.0]);
    }

    #[test]
    fn full_level_replaces_main() {
        let mut main = [0.0; 4];
        crossfade_in_place(&mut main, &[1.0, 0.5, -0.5, -1.0], 1.0);
        assert_eq!(main, [1.0, 0.5, -0.5, -1.0]);
    }

    #[test]
    fn weights_sum_to_one() {
        let mut main = [1.0];
        crossfade_in_place(&mut main, &[1.0], 0.3);
        assert!((main[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn level_is_clamped() {
        let mut main = [1.0];
        crossfade_in_place(&mut main, &[0.0], 2.0);
        assert_eq!(main[0], 0.0);

        let mut main = [1.0];
        crossfade_in_place(&mut main, &[0.0], f32::NAN);
        assert_eq!(main[0], 1.0);
    }
}
