pub mod autoplay;
pub mod casino;
pub mod engine;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

mod state;


pub use autoplay::{Autoplay, AutoplayStep, StopReason};
pub use casino::{GameRng, RandomSource};
pub use engine::{now_millis, GameEngine};
pub use state::{FileStore, Key, Memory, Persistence, Snapshot, Store, StoreError};
