//! RNG module - deterministic random source for scrambling grids
//!
//! Grid initialization takes any [`RandomSource`], so tests can script exact
//! draws while the game uses the seeded [`SimpleRng`].

/// Source of uniformly distributed `u32` values.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max). Returns 0 when `max` is 0.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
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

    /// Current internal state, usable as the seed of an identical generator.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Derive an independent generator for one level attempt.
    ///
    /// Mixes the level number into the state so each level gets its own scramble
    /// while staying reproducible for a given campaign seed.
    pub fn fork(&mut self, salt: u32) -> SimpleRng {
        let mixed = self.next_u32() ^ salt.wrapping_mul(0x9E37_79B9);
        SimpleRng::new(mixed)
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m, m = 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // The low bits of a power-of-two LCG have short periods; use the high half.
        self.state.rotate_left(16)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
