use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for every non-deterministic decision in the offseason.
/// Decisions never reach for a global generator, so identical seeds replay identically.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.next_f64() < probability
    }

    /// Uniform integer in `[low, high]`.
    fn range_i64(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        let span = (high - low + 1) as f64;
        low + ((self.next_f64() * span) as i64).min(high - low)
    }
}

#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream derived from this generator's seed. The result depends only
    /// on `(seed, stream)`, never on how much of the parent has been consumed.
    pub fn fork(&self, stream: u64) -> SeededRandom {
        SeededRandom::new(mix_seed(self.seed, stream))
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random_range(0.0..1.0)
    }
}

/// Fixed answer for every draw. Used where a decision must be forced.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.clamp(0.0, 0.999_999)
    }
}

// splitmix64 finalizer
fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);

        for _ in 0..16 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn fork_ignores_parent_consumption() {
        let parent = SeededRandom::new(7);
        let mut consumed = parent.clone();
        consumed.next_f64();
        consumed.next_f64();

        let mut a = parent.fork(3);
        let mut b = consumed.fork(3);
        assert_eq!(a.next_f64(), b.next_f64());

        let mut c = parent.fork(4);
        let mut d = parent.fork(3);
        assert_ne!(c.next_f64(), d.next_f64());
    }

    #[test]
    fn range_stays_inclusive() {
        let mut rng = SeededRandom::new(1);
        for _ in 0..200 {
            let v = rng.range_i64(-5, 5);
            assert!((-5..=5).contains(&v));
        }
        assert_eq!(rng.range_i64(3, 3), 3);
    }

    #[test]
    fn fixed_random_forces_chance() {
        let mut low = FixedRandom(0.0);
        let mut high = FixedRandom(1.0);
        assert!(low.chance(0.1));
        assert!(!high.chance(0.9));
        assert!(high.chance(1.0));
    }
}
