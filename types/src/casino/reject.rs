use super::{
    ERROR_AUTOPLAY_ACTIVE, ERROR_GAME_OVER, ERROR_INSUFFICIENT_BALANCE, ERROR_INVALID_BET,
    ERROR_INVALID_SPIN_COUNT, ERROR_NO_WIN_PENDING, ERROR_SPIN_IN_PROGRESS,
};

/// Reason an operation was refused. Rejected operations never mutate state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("bet must be greater than zero")]
    InvalidBet,
    #[error("not enough tokens")]
    InsufficientBalance,
    #[error("game over, restart to keep playing")]
    GameOver,
    #[error("a spin is already in progress")]
    SpinInProgress,
    #[error("no win is waiting to be acknowledged")]
    NoWinPending,
    #[error("autoplay needs at least one spin")]
    InvalidSpinCount,
    #[error("autoplay is already running")]
    AutoplayActive,
}

impl RejectReason {
    pub fn code(self) -> u8 {
        match self {
            RejectReason::InvalidBet => ERROR_INVALID_BET,
            RejectReason::InsufficientBalance => ERROR_INSUFFICIENT_BALANCE,
            RejectReason::GameOver => ERROR_GAME_OVER,
            RejectReason::SpinInProgress => ERROR_SPIN_IN_PROGRESS,
            RejectReason::NoWinPending => ERROR_NO_WIN_PENDING,
            RejectReason::InvalidSpinCount => ERROR_INVALID_SPIN_COUNT,
            RejectReason::AutoplayActive => ERROR_AUTOPLAY_ACTIVE,
        }
    }
}
