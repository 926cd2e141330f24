//! Deterministic pseudo-random sequencing for queue shuffling.
//!
//! A tiny linear-congruential generator: reproducible given a seed, so
//! shuffled queues are stable under test. It orders problems; it is not a
//! general-purpose randomness source.

use chrono::Utc;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

/// Linear-congruential generator over the classic 9301/49297/233280 params.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeded from the wall clock for everyday play.
    pub fn from_clock() -> Self {
        Self::new(Utc::now().timestamp_millis() as u64)
    }

    /// Next value, uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

/// In-place Fisher-Yates shuffle driven by the LCG.
pub fn shuffle<T>(items: &mut [T], rng: &mut Lcg) {
    for i in (1..items.len()).rev() {
        let j = (rng.next_f64() * (i as f64 + 1.0)) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Lcg::new(1);
        let mut b = Lcg::new(2);
        let seq_a: Vec<f64> = (0..10).map(|_| a.next_f64()).collect();
        let seq_b: Vec<f64> = (0..10).map(|_| b.next_f64()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn output_stays_in_unit_interval() {
        let mut rng = Lcg::new(u64::MAX);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "out of range: {}", v);
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = Lcg::new(7);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let mut first: Vec<u32> = (0..12).collect();
        let mut second: Vec<u32> = (0..12).collect();
        shuffle(&mut first, &mut Lcg::new(99));
        shuffle(&mut second, &mut Lcg::new(99));
        assert_eq!(first, second);
    }
}
