//! Lightweight xorshift32 PRNG for particle jitter — no external crate needed
//!
//! The simulation is intentionally non-deterministic: `from_entropy` is the
//! production constructor. Fixed seeds exist for distribution tests only.

pub struct FxRng {
    state: u32,
}

impl FxRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Entropy-seeded constructor. `RandomState` carries per-process random
    /// keys, so hashing nothing still yields a fresh seed on every call.
    pub fn from_entropy() -> Self {
        use std::collections::hash_map::RandomState;
        use std::hash::{BuildHasher, Hasher};
        let seed = RandomState::new().build_hasher().finish();
        Self::new((seed >> 32) as u32 ^ seed as u32)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform value in `center ± spread / 2`
    pub fn jitter(&mut self, center: f32, spread: f32) -> f32 {
        center + (self.next_f32() - 0.5) * spread
    }

    /// Uniform choice from a slice; `None` when the slice is empty
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = (self.next_f32() * items.len() as f32) as usize;
        items.get(idx.min(items.len() - 1))
    }
}

impl Default for FxRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds() {
        let mut rng = FxRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn jitter_stays_within_half_spread() {
        let mut rng = FxRng::new(7);
        for _ in 0..1000 {
            let v = rng.jitter(5.0, 2.0);
            assert!((4.0..6.0).contains(&v));
        }
    }

    #[test]
    fn pick_covers_all_items() {
        let mut rng = FxRng::new(99);
        let items = [1, 2, 3, 4];
        let mut seen = [false; 4];
        for _ in 0..200 {
            let v = *rng.pick(&items).unwrap();
            seen[v - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert!(rng.pick::<u32>(&[]).is_none());
    }

    #[test]
    fn entropy_seeds_differ() {
        let a = FxRng::from_entropy().next_f32();
        let b = FxRng::from_entropy().next_f32();
        // Technically flaky, astronomically unlikely
        assert!((a - b).abs() > f32::EPSILON);
    }
}
