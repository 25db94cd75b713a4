//! Seedable linear-congruential generator.
//!
//! The engine's only non-determinism (opponent jitter, serve angle
//! variance) flows through an `LcgRng` passed explicitly into the tick
//! call, so the same seed reproduces the exact same match.

/// 64-bit LCG. Not cryptographically secure; sufficient for game jitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcgRng {
    state: u64,
}

const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1442695040888963407;

impl LcgRng {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        (self.state >> 33) as u32
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (u64::from(u32::MAX) + 1) as f64
    }

    /// Uniform value in `[-amplitude, amplitude]`.
    #[inline]
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}
