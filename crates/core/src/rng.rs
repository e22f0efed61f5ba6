//! RNG module - deterministic randomness for idle animation phases
//!
//! Elements start their idle loop from a random frame so a freshly entered
//! level does not pulse in lockstep. A simple LCG keeps this reproducible for
//! a given seed, which matters for headless runs and tests.

/// Number of distinct idle start phases (phase = n / IDLE_PHASE_STEPS)
pub const IDLE_PHASE_STEPS: u32 = 100;

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max), 0 when `max` is 0
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Random idle animation phase in [0, 1), quantized to hundredths
    pub fn next_phase(&mut self) -> f32 {
        self.next_range(IDLE_PHASE_STEPS) as f32 / IDLE_PHASE_STEPS as f32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
