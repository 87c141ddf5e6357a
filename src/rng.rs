//! Random sources for secret selection
//!
//! Every randomized step of the game goes through [`RandomSource`], so a
//! front end can run on a real generator while tests pin the secret.

/// Source of the randomness used by a game
pub trait RandomSource {
    /// Draws a secret uniformly from `1..=range_max`
    ///
    /// Callers guarantee `range_max >= 1`.
    fn draw_secret(&mut self, range_max: u32) -> u32;

    /// Picks an index uniformly from `0..len`
    ///
    /// Callers guarantee `len >= 1`.
    fn pick(&mut self, len: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    fn draw_secret(&mut self, range_max: u32) -> u32 {
        self.u32(1..=range_max)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.usize(..len)
    }
}

/// A source that always yields the same secret
///
/// The secret is clamped into the requested range, so a session built
/// from it still upholds `1 <= secret <= range_max`. Picks always return
/// the first index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSource(u32);

impl FixedSource {
    /// Creates a source that draws `secret` whenever it fits the range
    pub fn new(secret: u32) -> Self {
        Self(secret)
    }
}

impl RandomSource for FixedSource {
    fn draw_secret(&mut self, range_max: u32) -> u32 {
        self.0.clamp(1, range_max.max(1))
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}
