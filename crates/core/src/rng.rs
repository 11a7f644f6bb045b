//! RNG module - injectable, seedable randomness
//!
//! Every randomized step of the engine (deck shuffle, layout jitter, shuffle
//! and undo placement) draws from a [`RandomSource`]. The default source is a
//! simple LCG so that the same seed always produces the same level.

/// Redraws allowed by [`RandomSource::next_range`] before it accepts a biased
/// value. A uniform source needs more than one with probability below
/// `max / 2^32`.
pub const MAX_REJECTIONS: u32 = 16;

/// Source of randomness used by the engine.
///
/// Implementors only provide [`next_u32`](RandomSource::next_u32); the derived
/// helpers are unbiased.
pub trait RandomSource {
    /// Generate the next uniformly distributed `u32`.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, max)`. Returns 0 when `max` is 0.
    ///
    /// Uses multiply-shift with rejection, so there is no modulo bias and the
    /// result depends on the high bits (the strong bits of an LCG). After
    /// [`MAX_REJECTIONS`] rejected draws the last one is used as is, so a
    /// degenerate source (constant or scripted) cannot hang the caller.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        let threshold = max.wrapping_neg() % max;
        let mut m = (self.next_u32() as u64) * (max as u64);
        let mut rejected = 0;
        while (m as u32) < threshold && rejected < MAX_REJECTIONS {
            m = (self.next_u32() as u64) * (max as u64);
            rejected += 1;
        }
        (m >> 32) as u32
    }

    /// Uniform value in `[0, 1)` with 24 bits of precision.
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform value in `[-half_width, half_width)`.
    fn next_signed(&mut self, half_width: f32) -> f32 {
        (self.next_f32() - 0.5) * 2.0 * half_width
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state (usable as a seed to resume the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed sequence of values, cycling when exhausted. An empty
/// script yields 0 forever.
///
/// Handy for tests that need to steer a specific random draw. Values that
/// [`RandomSource::next_range`] rejects are skipped, up to
/// [`MAX_REJECTIONS`] of them per call.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_not_degenerate() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..50 {
            for _ in 0..20 {
                assert!(rng.next_range(max) < max);
            }
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_next_range_terminates_on_rejected_script() {
        // 0 * 3 falls below the rejection threshold for max = 3.
        let mut rng = ScriptedRng::new(vec![0]);
        assert_eq!(rng.next_range(3), 0);

        let mut empty = ScriptedRng::new(Vec::new());
        let mut values = [1, 2, 3, 4, 5];
        empty.shuffle(&mut values);
        let mut sorted = values;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_next_range_skips_rejected_values() {
        let mut rng = ScriptedRng::new(vec![0, u32::MAX]);
        assert_eq!(rng.next_range(3), 2);
    }

    #[test]
    fn test_next_range_covers_every_value() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[rng.next_range(6) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_next_f32_unit_interval() {
        let mut rng = SimpleRng::new(3);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_next_signed_range() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..1000 {
            let v = rng.next_signed(0.2);
            assert!((-0.2..0.2).contains(&v));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::new(42);
        let mut values: Vec<u32> = (0..32).collect();
        rng.shuffle(&mut values);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
        assert_ne!(values, sorted);
    }

    #[test]
    fn test_scripted_rng_cycles() {
        let mut rng = ScriptedRng::new(vec![1, 2]);
        assert_eq!(rng.next_u32(), 1);
        assert_eq!(rng.next_u32(), 2);
        assert_eq!(rng.next_u32(), 1);
    }
}
