//! Randomness seam for the session's probabilistic trace lines.

use rand::Rng;
use rand::rngs::StdRng;

/// Source of independent yes/no draws.
pub trait ChanceSource {
    /// Returns `true` with the given probability (clamped to `[0, 1]`).
    fn chance(&mut self, probability: f64) -> bool;
}

impl ChanceSource for StdRng {
    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.random_bool(probability.clamp(0.0, 1.0))
    }
}

/// Always answers the same way. Forces or suppresses probabilistic
/// branches deterministically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedChance(pub bool);

impl ChanceSource for FixedChance {
    fn chance(&mut self, _probability: f64) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn rng_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
        assert!(!rng.chance(f64::NAN));
        assert!(rng.chance(3.0));
    }

    #[test]
    fn fixed_chance_ignores_probability() {
        assert!(FixedChance(true).chance(0.0));
        assert!(!FixedChance(false).chance(1.0));
    }
}
