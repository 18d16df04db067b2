//! Game logic for the two games on the floor:
//! - Slots (three reels, fixed multiplier table)
//! - Risk event (one die roll, one lethal face)

pub mod risk;
pub mod slot;

use highroller_types::casino::{Symbol, DIE_FACES, REELS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Source of the uniform draws the games consume.
///
/// The engine only talks to randomness through this trait so tests can replay
/// fixed reel stops and die rolls.
pub trait RandomSource {
    /// Draw one reel stop, uniformly over [Symbol::ALL].
    fn draw_symbol(&mut self) -> Symbol;

    /// Roll a single die (1-6).
    fn roll_die(&mut self) -> u8;

    /// Draw a full reel line.
    fn draw_reels(&mut self) -> [Symbol; REELS] {
        [self.draw_symbol(), self.draw_symbol(), self.draw_symbol()]
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn draw_symbol(&mut self) -> Symbol {
        (**self).draw_symbol()
    }

    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

/// Production random source.
///
/// Seeded sessions are reproducible; unseeded sessions draw their seed from the OS.
#[derive(Clone)]
pub struct GameRng {
    inner: ChaCha20Rng,
}

impl GameRng {
    /// Create a reproducible RNG from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha20Rng::from_entropy(),
        }
    }

    /// Get a random u8 value.
    pub fn next_u8(&mut self) -> u8 {
        self.inner.gen()
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        // Rejection sampling keeps the distribution unbiased
        let limit = u8::MAX - (u8::MAX % max);
        loop {
            let value = self.next_u8();
            if value < limit {
                return value % max;
            }
        }
    }
}

impl RandomSource for GameRng {
    fn draw_symbol(&mut self) -> Symbol {
        Symbol::ALL[self.next_bounded(Symbol::ALL.len() as u8) as usize]
    }

    fn roll_die(&mut self) -> u8 {
        self.next_bounded(DIE_FACES) + 1
    }
}
