//! RNG module - piece generation with the anti-streak rule
//!
//! Piece kinds are drawn uniformly from the seven canonical kinds, except that a
//! kind already dealt twice in a row is rejected until a different kind comes up.
//! The preview queue always holds exactly [`NEXT_QUEUE_LEN`] kinds and is
//! refilled one-for-one as pieces are consumed.
//!
//! Also provides a simple LCG so games are reproducible from a seed.

use crate::types::{PieceKind, MAX_STREAK, NEXT_QUEUE_LEN};

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

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform piece generator that never deals a kind three times in a row.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    /// Kind of the current run of identical draws.
    streak_kind: Option<PieceKind>,
    /// Length of the current run (1 after any change of kind).
    streak_len: u8,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            streak_kind: None,
            streak_len: 0,
        }
    }

    /// Draw the next kind, rerolling a kind that would extend a full streak.
    pub fn draw(&mut self) -> PieceKind {
        let kind = loop {
            let candidate = PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize];
            if self.streak_kind == Some(candidate) && self.streak_len >= MAX_STREAK {
                continue;
            }
            break candidate;
        };

        if self.streak_kind == Some(kind) {
            self.streak_len += 1;
        } else {
            self.streak_kind = Some(kind);
            self.streak_len = 1;
        }
        kind
    }

    /// Forget the current streak (used on reset).
    pub fn reset_streak(&mut self) {
        self.streak_kind = None;
        self.streak_len = 0;
    }

    pub fn streak(&self) -> (Option<PieceKind>, u8) {
        (self.streak_kind, self.streak_len)
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

/// Fixed-length preview of upcoming kinds.
#[derive(Debug, Clone)]
pub struct NextQueue {
    queue: [PieceKind; NEXT_QUEUE_LEN],
    generator: PieceGenerator,
}

impl NextQueue {
    /// Create a queue and fill it from a fresh generator.
    pub fn new(seed: u32) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let queue = std::array::from_fn(|_| generator.draw());
        Self { queue, generator }
    }

    /// Reset the streak tracker and deal a whole new preview.
    pub fn refill(&mut self) {
        self.generator.reset_streak();
        for slot in self.queue.iter_mut() {
            *slot = self.generator.draw();
        }
    }

    /// Take the front kind and append a freshly drawn one.
    pub fn pop(&mut self) -> PieceKind {
        let kind = self.queue[0];
        self.queue.rotate_left(1);
        self.queue[NEXT_QUEUE_LEN - 1] = self.generator.draw();
        kind
    }

    pub fn peek(&self) -> &[PieceKind; NEXT_QUEUE_LEN] {
        &self.queue
    }

    /// Current RNG state (feeds a restart with the same continuation).
    pub fn seed(&self) -> u32 {
        self.generator.rng_state()
    }
}

impl Default for NextQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
