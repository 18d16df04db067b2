use crate::{
    casino::{GameRng, RandomSource},
    state::{Key, Memory, Store, StoreError},
    GameEngine,
};
use highroller_types::casino::{Symbol, REELS};
use std::{collections::VecDeque, io};

/// Random source that replays scripted reel lines and die rolls.
///
/// Once a script runs dry it falls back to a fixed-seed [GameRng].
pub struct ScriptedRng {
    symbols: VecDeque<Symbol>,
    rolls: VecDeque<u8>,
    fallback: GameRng,
}

impl Default for ScriptedRng {
    fn default() -> Self {
        Self {
            symbols: VecDeque::new(),
            rolls: VecDeque::new(),
            fallback: GameRng::new(0),
        }
    }
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full reel line.
    pub fn with_reels(mut self, reels: [Symbol; REELS]) -> Self {
        self.symbols.extend(reels);
        self
    }

    /// Queue the same losing line `count` times.
    pub fn with_losses(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.symbols
                .extend([Symbol::Cherry, Symbol::Lemon, Symbol::Bell]);
        }
        self
    }

    /// Queue die rolls.
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u8>) -> Self {
        self.rolls.extend(rolls);
        self
    }
}

impl RandomSource for ScriptedRng {
    fn draw_symbol(&mut self) -> Symbol {
        self.symbols
            .pop_front()
            .unwrap_or_else(|| self.fallback.draw_symbol())
    }

    fn roll_die(&mut self) -> u8 {
        self.rolls
            .pop_front()
            .unwrap_or_else(|| self.fallback.roll_die())
    }
}

/// Store whose every operation fails, as if the medium were gone.
#[derive(Default)]
pub struct FailingStore;

impl Store for FailingStore {
    fn get(&self, _: &Key) -> Result<Option<String>, StoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "store offline").into())
    }

    fn insert(&mut self, _: Key, _: String) -> Result<(), StoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "store offline").into())
    }
}

/// Creates an in-memory engine holding exactly `balance` tokens
pub fn create_engine(balance: u64, rng: ScriptedRng) -> GameEngine<Memory, ScriptedRng> {
    GameEngine::seeded(Memory::default(), rng, balance)
}

/// Creates an engine restored from pre-populated records
pub fn create_engine_from_records(
    balance: Option<&str>,
    history: Option<&str>,
    rng: ScriptedRng,
) -> GameEngine<Memory, ScriptedRng> {
    let mut store = Memory::default();
    if let Some(balance) = balance {
        let _ = store.insert(Key::Balance, balance.to_string());
    }
    if let Some(history) = history {
        let _ = store.insert(Key::History, history.to_string());
    }
    GameEngine::new(store, rng)
}
