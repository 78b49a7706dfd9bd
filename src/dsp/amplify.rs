//! Gain stages.

/*
The voice's amplifier (VCA) is a multiplication: the filtered signal times
the envelope level, sample by sample,

    output[i] = signal[i] × envelope[i]

followed by a constant master volume. The envelope lives in [0, 1], so the
VCA only ever attenuates. Every halving of amplitude is about −6 dB:

    ×1.0 = 0 dB   ×0.5 ≈ −6 dB   ×0.25 ≈ −12 dB   ×0.0 = silence
*/

/// Multiply a signal by a modulator in place.
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator.iter()) {
        *s *= m;
    }
}

/// Multiply a signal by a constant gain factor in place.
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_in_place() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        multiply_in_place(&mut signal, &[1.0, 0.5, 0.5, 0.0]);
        assert_eq!(signal, [1.0, 0.25, -0.25, 0.0]);
    }

    #[test]
    fn test_apply_gain() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        apply_gain(&mut signal, 0.5);
        assert_eq!(signal, [0.5, 0.25, -0.25, -0.5]);
    }

    #[test]
    fn test_zero_gain_silences() {
        let mut signal = [0.3, -0.7, 0.5];
        apply_gain(&mut signal, 0.0);
        assert!(signal.iter().all(|&s| s == 0.0));
    }
}
