//! Jitter sources for the synthetic series.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces bounded non-negative jitter.
pub trait NoiseSource {
    /// A value in `[0, bound)`. Non-positive or non-finite bounds give 0.
    fn sample(&mut self, bound: f64) -> f64;
}

/// ChaCha-backed uniform jitter; reproducible when seeded.
#[derive(Clone, Debug)]
pub struct SeededNoise {
    rng: ChaCha8Rng,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        SeededNoise {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy; output differs per run.
    pub fn from_entropy() -> Self {
        SeededNoise {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn sample(&mut self, bound: f64) -> f64 {
        if !(bound.is_finite() && bound > 0.0) {
            return 0.0;
        }
        self.rng.gen_range(0.0..bound)
    }
}

/// No jitter at all: the series is exactly `base + index * slope`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn sample(&mut self, _bound: f64) -> f64 {
        0.0
    }
}

/// Always the same fraction of the bound. Fractions are clamped to `[0, 1)`.
#[derive(Clone, Copy, Debug)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn sample(&mut self, bound: f64) -> f64 {
        if !(bound.is_finite() && bound > 0.0) || !self.0.is_finite() {
            return 0.0;
        }
        bound * self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seeded_noise_is_reproducible() {
        let mut a = SeededNoise::new(42);
        let mut b = SeededNoise::new(42);
        for _ in 0..10 {
            assert_eq!(a.sample(5.0), b.sample(5.0));
        }
    }

    #[test]
    fn degenerate_bounds_give_zero() {
        let mut n = SeededNoise::new(1);
        assert_eq!(n.sample(0.0), 0.0);
        assert_eq!(n.sample(-1.0), 0.0);
        assert_eq!(n.sample(f64::NAN), 0.0);
        assert_eq!(FixedNoise(0.5).sample(0.0), 0.0);
    }

    #[test]
    fn fixed_noise_stays_below_bound() {
        assert_eq!(FixedNoise(0.5).sample(2.0), 1.0);
        assert!(FixedNoise(1.0).sample(2.0) < 2.0);
        assert_eq!(FixedNoise(-3.0).sample(2.0), 0.0);
        assert_eq!(NoNoise.sample(9.0), 0.0);
    }

    proptest! {
        #[test]
        fn seeded_noise_is_bounded(seed in any::<u64>(), bound in 0.001f64..100.0) {
            let mut n = SeededNoise::new(seed);
            for _ in 0..16 {
                let v = n.sample(bound);
                prop_assert!((0.0..bound).contains(&v));
            }
        }
    }
}
