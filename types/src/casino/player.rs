use serde::{Deserialize, Serialize};

use super::{HistoryLog, RISK_COST, STARTING_STAKE, WIN_TARGET};

/// Progress towards the win target.
///
/// Once the target is reached the signal stays raised (or acknowledged) until a
/// reset, even if the balance later drops below the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinStatus {
    #[default]
    Unreached,
    /// Target reached, the player has not responded yet.
    Pending,
    /// The player chose to keep playing after reaching the target.
    Acknowledged,
}

/// Whether the player can still play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Active,
    /// Lost a risk event; only a reset leaves this phase.
    Dead,
}

/// Player state owned by the game engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub balance: u64,
    pub history: HistoryLog,
    pub win: WinStatus,
    pub alive: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(STARTING_STAKE, HistoryLog::default())
    }
}

impl GameState {
    pub fn new(balance: u64, history: HistoryLog) -> Self {
        Self {
            balance,
            history,
            win: WinStatus::Unreached,
            alive: true,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.alive {
            Phase::Active
        } else {
            Phase::Dead
        }
    }

    pub fn win_acknowledged(&self) -> bool {
        self.win == WinStatus::Acknowledged
    }

    pub fn win_pending(&self) -> bool {
        self.win == WinStatus::Pending
    }

    /// Raises the win signal if the balance is at or above target and it has not
    /// been raised yet. Returns true only on the transition.
    pub fn check_win(&mut self) -> bool {
        if self.win == WinStatus::Unreached && self.balance >= WIN_TARGET {
            self.win = WinStatus::Pending;
            return true;
        }
        false
    }

    pub fn can_play_risk(&self) -> bool {
        self.alive && self.balance >= RISK_COST
    }

    /// Largest wager the player can place (never below 1).
    pub fn max_bet(&self) -> u64 {
        self.balance.max(1)
    }
}
