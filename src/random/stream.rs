//! Seeded pseudo-random stream.
//!
//! The stream is a mulberry32 generator whose 32-bit state is derived from a string seed.
//! Every draw advances the state exactly once, so the N-th call against a stream created
//! from a given seed always returns the same value. Layout reproducibility depends on both
//! the seed hash and the mixing function below; changing either changes every layout.

/// Additive constant applied to the state before each mix.
pub const STREAM_INCREMENT: u32 = 0x6D2B_79F5;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Fold a seed string into the initial 32-bit generator state.
///
/// Each UTF-16 code unit is folded with `h = h * 31 + unit` in wrapping 32-bit
/// arithmetic. The empty string maps to `0`.
pub fn seed_state(seed: &str) -> u32 {
    seed.encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Deterministic random stream seeded from a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomStream {
    state: u32,
}

impl RandomStream {
    /// Create a stream from a seed string.
    pub fn new(seed: &str) -> Self {
        Self::from_state(seed_state(seed))
    }

    /// Resume a stream from a raw state (see [`RandomStream::state`]).
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current raw state. Replaying from this value reproduces all later draws.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Next raw 32-bit output.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STREAM_INCREMENT);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn next_float(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Uniform integer in `[min, max]` inclusive. Callers must ensure `max >= min`.
    #[inline]
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(max >= min, "next_int requires max >= min");
        let span = i64::from(max) - i64::from(min) + 1;
        let step = (self.next_float() * span as f64).floor() as i64;
        (i64::from(min) + step) as i32
    }

    /// Uniform index in `[0, len)`. Callers must ensure `len > 0`.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index requires a non-empty range");
        (self.next_float() * len as f64).floor() as usize
    }

    /// Uniform float in `[min, max)`.
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_float() * (max - min)
    }

    /// `true` with probability `p` (consumes one draw).
    #[inline]
    pub fn next_chance(&mut self, p: f64) -> bool {
        self.next_float() < p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/random/stream.rs"]
mod tests;
