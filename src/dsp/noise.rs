//! White noise source.

/*
Pseudo-random numbers on the audio thread
=========================================

Noise oscillators and sample & hold LFOs need a fresh random value every
sample (or every step). A general purpose RNG crate is overkill here and may
allocate or lock on first use, so we use a 32-bit xorshift generator:

    x ^= x << 13
    x ^= x >> 17
    x ^= x << 5

Three shifts and three xors per value, no branches, no memory. The sequence
has period 2³² − 1 and never produces 0 as long as it isn't seeded with 0,
which is why `with_seed` replaces a zero seed.

The raw u32 is mapped to [-1.0, 1.0] by scaling into [0.0, 1.0] and
converting unipolar to bipolar.
*/

const DEFAULT_SEED: u32 = 0x1234_5678;

#[derive(Debug, Clone, Copy)]
pub struct WhiteNoise {
    state: u32,
}

impl WhiteNoise {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u32) -> Self {
        let state = if seed == 0 { DEFAULT_SEED } else { seed };
        Self { state }
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next uniformly distributed sample in [-1.0, 1.0].
    #[inline]
    pub fn next_bipolar(&mut self) -> f32 {
        let unipolar = self.next_u32() as f32 / u32::MAX as f32;
        (unipolar * 2.0 - 1.0).clamp(-1.0, 1.0)
    }
}

impl Default for WhiteNoise {
    fn default() -> Self {
        Self::new()
    }
}
