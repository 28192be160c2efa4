//! RNG module - deterministic spawn randomness
//!
//! The engine owns one [`SimpleRng`] and draws every spawn from it, so a game
//! started from the same seed with the same inputs replays exactly.
//!
//! Spawn rules:
//! - Cell: uniform over the empty cells
//! - Value: exponent 1 (a "2") nine times in ten, exponent 2 (a "4") otherwise

use crate::types::SPAWN_TWO_IN_TEN;

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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period (bit 0 simply alternates).
    pub fn next_range(&mut self, max: u32) -> u32 {
        assert!(max > 0, "empty range");
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick an index in `0..len`
    pub fn pick(&mut self, len: usize) -> usize {
        assert!(len > 0 && len <= u32::MAX as usize, "bad pick range {len}");
        self.next_range(len as u32) as usize
    }

    /// Exponent of a freshly spawned tile: 1 with p=0.9, 2 with p=0.1
    pub fn spawn_exponent(&mut self) -> u8 {
        if self.next_range(10) < SPAWN_TWO_IN_TEN {
            1
        } else {
            2
        }
    }

    /// Current RNG state (seeding a new RNG with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
