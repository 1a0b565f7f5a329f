use serde::{Deserialize, Serialize};

/// Source of randomness for the engine. Implemented by [`PseudoRandom`] and by scripted
/// generators in tests.
pub trait RandomGenerator {
    fn next_u32(&mut self) -> u32;

    /// Value in `[0, bound)` by plain reduction, so slightly biased towards low values.
    /// `bound` must be non-zero.
    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

// Simple pseudorandom number generator using xorshift algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoRandom {
    state: u64,
}

impl PseudoRandom {
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the zero state
        let state = if seed == 0 { 0x1234567890abcdef } else { seed };
        PseudoRandom { state }
    }

    /// Seeds from the system clock. Used when no explicit seed is configured.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(nanos)
    }

    pub fn next_u64(&mut self) -> u64 {
        // xorshift64 algorithm
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

impl RandomGenerator for PseudoRandom {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform value in `[0, bound)`. Draws below `2^32 % bound` are redrawn.
    fn next_below(&mut self, bound: u32) -> u32 {
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let value = self.next_u32();
            if value >= threshold {
                return value % bound;
            }
        }
    }
}
