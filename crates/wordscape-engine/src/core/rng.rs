//! Seedable speed sampling for word entities.

use crate::api::config::SpeedRange;

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic and fast; the same seed always yields the same speeds.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Restart the sequence as if freshly created with `seed`.
    pub fn reseed(&mut self, seed: u64) {
        *self = Rng::new(seed);
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in the closed interval [0, 1].
    pub fn next_unit(&mut self) -> f32 {
        const MAX_24: u64 = (1 << 24) - 1;
        // 24 high bits fit an f32 mantissa exactly.
        ((self.next_u64() >> 40) as f32) / MAX_24 as f32
    }
}

/// Source of per-word speed factors.
pub trait SpeedSampler {
    /// Draw a speed factor from `range`.
    fn sample(&mut self, range: SpeedRange) -> f32;

    /// Restart the sampler's sequence. Stateless samplers ignore this.
    fn reseed(&mut self, _seed: u64) {}
}

impl SpeedSampler for Rng {
    fn sample(&mut self, range: SpeedRange) -> f32 {
        let (low, high) = (range.low(), range.high());
        range.clamp(low + self.next_unit() * (high - low))
    }

    fn reseed(&mut self, seed: u64) {
        Rng::reseed(self, seed);
    }
}

/// Always yields the same speed factor (clamped into the requested range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSpeed(pub f32);

impl SpeedSampler for FixedSpeed {
    fn sample(&mut self, range: SpeedRange) -> f32 {
        range.clamp(self.0)
    }
}
