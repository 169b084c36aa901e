// Mulberry32-style seeded generator

/// 32-bit seeded pseudo-random generator producing values in `[0, 1)`
///
/// One additive step and two xor-multiply-shift rounds per draw. Two
/// generators built from the same seed yield the same infinite sequence.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    const INCREMENT: u32 = 0x6d2b_79f5;
    const SCALE: f64 = 4_294_967_296.0;

    /// Create a generator; the seed is taken modulo 2^32
    pub fn new(seed: impl Into<u64>) -> Self {
        Self {
            state: seed.into() as u32,
        }
    }

    /// Advance the state and return the next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let t = self.state;
        let mut x = (t ^ (t >> 15)).wrapping_mul(1 | t);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(61 | x));
        f64::from(x ^ (x >> 14)) / Self::SCALE
    }

    /// `base + next * span`
    pub fn next_in(&mut self, base: f64, span: f64) -> f64 {
        base + self.next_f64() * span
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Iterator for SeededRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
