//! Random draws for a bout
//!
//! Every random decision in a bout goes through one [`Dice`], so a bout is
//! fully reproducible from its seed. All draws are derived from a single
//! uniform roll in `[0, 1)`; this keeps forced-outcome generators such as
//! [`ConstantRng`] usable (a constant stream never stalls a draw).

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;

pub struct Dice {
    rng: Box<dyn RngCore + Send>,
}

impl Dice {
    /// Deterministic dice for a given seed
    pub fn seeded(seed: u64) -> Self {
        Dice {
            rng: Box::new(ChaCha12Rng::seed_from_u64(seed)),
        }
    }

    /// Wrap any generator (tests use this to force outcomes)
    pub fn from_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Dice { rng: Box::new(rng) }
    }

    /// Uniform roll in `[0, 1)`
    #[inline]
    pub fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// True with probability `p`; a roll of 0 succeeds whenever `p > 0`
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }

    /// Uniform value in `[low, high)`
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.roll()
    }

    /// Uniform integer in the inclusive range `low..=high`
    pub fn between(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = high - low + 1;
        let offset = (self.roll() * span as f64) as u32;
        low + offset.min(span - 1)
    }

    /// Index drawn proportionally to `weights`
    ///
    /// Negative and non-finite weights count as zero. Returns `None` when no
    /// weight is positive.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let total: f64 = weights.iter().map(|w| clean(*w)).sum();
        if total <= 0.0 {
            return None;
        }

        let target = self.roll() * total;
        let mut cumulative = 0.0;
        let mut last_positive = None;
        for (i, w) in weights.iter().enumerate() {
            let w = clean(*w);
            if w <= 0.0 {
                continue;
            }
            cumulative += w;
            last_positive = Some(i);
            if target < cumulative {
                return Some(i);
            }
        }
        // Floating point can leave target a hair above the final sum
        last_positive
    }

    /// Fair coin: true for heads
    pub fn coin_flip(&mut self) -> bool {
        self.roll() < 0.5
    }
}

impl std::fmt::Debug for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dice").finish_non_exhaustive()
    }
}

/// Generator that returns the same word forever
///
/// `ConstantRng(0)` makes every roll 0.0 (first option, every chance
/// succeeds); `ConstantRng(u64::MAX)` makes every roll just under 1.0 (last
/// option, every bounded chance fails).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantRng(pub u64);

impl ConstantRng {
    pub fn lowest() -> Self {
        ConstantRng(0)
    }

    pub fn highest() -> Self {
        ConstantRng(u64::MAX)
    }
}

impl RngCore for ConstantRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = self.0.to_le_bytes();
        for (i, b) in dest.iter_mut().enumerate() {
            *b = bytes[i % 8];
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_dice_repeat() {
        let mut a = Dice::seeded(7);
        let mut b = Dice::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.roll().to_bits(), b.roll().to_bits());
        }
    }

    #[test]
    fn test_constant_low_takes_first_option() {
        let mut dice = Dice::from_rng(ConstantRng::lowest());
        assert_eq!(dice.roll(), 0.0);
        assert!(dice.chance(0.01));
        assert!(!dice.chance(0.0));
        assert_eq!(dice.weighted_index(&[0.0, 2.0, 1.0]), Some(1));
        assert_eq!(dice.between(3, 8), 3);
        assert!(dice.coin_flip());
    }

    #[test]
    fn test_constant_high_takes_last_option() {
        let mut dice = Dice::from_rng(ConstantRng::highest());
        assert!(dice.roll() < 1.0);
        assert!(!dice.chance(0.9));
        assert_eq!(dice.weighted_index(&[1.0, 2.0, 0.0]), Some(1));
        assert_eq!(dice.between(3, 8), 8);
        assert!(!dice.coin_flip());
    }

    #[test]
    fn test_weighted_index_ignores_bad_weights() {
        let mut dice = Dice::seeded(1);
        assert_eq!(dice.weighted_index(&[]), None);
        assert_eq!(dice.weighted_index(&[0.0, -1.0, f64::NAN]), None);
        for _ in 0..50 {
            assert_eq!(dice.weighted_index(&[-3.0, 0.0, 4.0]), Some(2));
        }
    }

    #[test]
    fn test_between_stays_in_range() {
        let mut dice = Dice::seeded(99);
        for _ in 0..1000 {
            let v = dice.between(2, 5);
            assert!((2..=5).contains(&v));
        }
        assert_eq!(dice.between(4, 4), 4);
        assert_eq!(dice.between(6, 2), 6);
    }
}
