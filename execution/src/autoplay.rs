//! Autoplay session state machine.
//!
//! ```text
//! Idle --arm--> Armed --begin_spin--> Spinning --complete_spin--> Armed
//!                 |                      |                    \-> Stopped(reason)
//!                 \------cancel----------+--> Stopped(Cancelled)
//! ```
//!
//! The machine never performs a spin itself. A driver asks for the next wager,
//! runs the spin, and reports the result back. Cancelling while a spin is in flight
//! lets that spin resolve normally and stops afterwards.

use highroller_types::casino::RejectReason;
use std::fmt;

/// Why an autoplay session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Every requested spin was played.
    Exhausted,
    /// The balance can no longer cover the wager.
    InsufficientFunds,
    /// The player turned autoplay off.
    Cancelled,
    /// The engine refused a spin.
    Rejected(RejectReason),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => f.write_str("Auto finished."),
            StopReason::InsufficientFunds => f.write_str("Auto stopped."),
            StopReason::Cancelled => f.write_str("Auto cancelled."),
            StopReason::Rejected(reason) => write!(f, "Auto stopped: {reason}."),
        }
    }
}

/// What the driver should do after a completed spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayStep {
    Continue { bet: u64, remaining: u32 },
    Stopped(StopReason),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Autoplay {
    #[default]
    Idle,
    Armed {
        bet: u64,
        remaining: u32,
    },
    Spinning {
        bet: u64,
        remaining: u32,
        cancelled: bool,
    },
    Stopped(StopReason),
}

impl Autoplay {
    /// Arm a session of `count` spins at `bet` each.
    pub fn arm(bet: u64, count: u32) -> Self {
        Autoplay::Armed {
            bet,
            remaining: count,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Autoplay::Armed { .. } | Autoplay::Spinning { .. })
    }

    /// Spins left in the session, counting one in flight.
    pub fn remaining(&self) -> u32 {
        match self {
            Autoplay::Armed { remaining, .. } | Autoplay::Spinning { remaining, .. } => *remaining,
            _ => 0,
        }
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Autoplay::Stopped(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Take the next wager. Only an armed session yields one.
    pub fn begin_spin(&mut self) -> Option<u64> {
        let Autoplay::Armed { bet, remaining } = *self else {
            return None;
        };
        *self = Autoplay::Spinning {
            bet,
            remaining,
            cancelled: false,
        };
        Some(bet)
    }

    /// Report the spin taken with [Autoplay::begin_spin].
    ///
    /// `result` carries the balance after the spin, or the reason it was refused.
    /// Returns `None` if no spin was in flight.
    pub fn complete_spin(&mut self, result: Result<u64, RejectReason>) -> Option<AutoplayStep> {
        let Autoplay::Spinning {
            bet,
            remaining,
            cancelled,
        } = *self
        else {
            return None;
        };
        let remaining = remaining.saturating_sub(1);
        let step = match result {
            Err(reason) => AutoplayStep::Stopped(StopReason::Rejected(reason)),
            Ok(_) if cancelled => AutoplayStep::Stopped(StopReason::Cancelled),
            Ok(_) if remaining == 0 => AutoplayStep::Stopped(StopReason::Exhausted),
            Ok(balance) if balance < bet => AutoplayStep::Stopped(StopReason::InsufficientFunds),
            Ok(_) => AutoplayStep::Continue { bet, remaining },
        };
        *self = match step {
            AutoplayStep::Continue { bet, remaining } => Autoplay::Armed { bet, remaining },
            AutoplayStep::Stopped(reason) => Autoplay::Stopped(reason),
        };
        Some(step)
    }

    /// Prevent any further spin. Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        match self {
            Autoplay::Armed { .. } => {
                *self = Autoplay::Stopped(StopReason::Cancelled);
                true
            }
            Autoplay::Spinning { cancelled, .. } => {
                *cancelled = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_exactly_count_spins() {
        let mut autoplay = Autoplay::arm(10, 3);
        let mut spins = 0;
        while let Some(bet) = autoplay.begin_spin() {
            assert_eq!(bet, 10);
            spins += 1;
            autoplay.complete_spin(Ok(1_000));
        }
        assert_eq!(spins, 3);
        assert_eq!(autoplay.stop_reason(), Some(StopReason::Exhausted));
        assert!(!autoplay.is_active());
    }

    #[test]
    fn test_stops_when_balance_cannot_cover_bet() {
        let mut autoplay = Autoplay::arm(10, 5);
        autoplay.begin_spin();
        assert_eq!(
            autoplay.complete_spin(Ok(10)),
            Some(AutoplayStep::Continue {
                bet: 10,
                remaining: 4
            })
        );
        autoplay.begin_spin();
        assert_eq!(
            autoplay.complete_spin(Ok(9)),
            Some(AutoplayStep::Stopped(StopReason::InsufficientFunds))
        );
    }

    #[test]
    fn test_cancel_while_armed() {
        let mut autoplay = Autoplay::arm(1, 5);
        assert!(autoplay.cancel());
        assert_eq!(autoplay.begin_spin(), None);
        assert_eq!(autoplay.stop_reason(), Some(StopReason::Cancelled));
        assert!(!autoplay.cancel());
    }

    #[test]
    fn test_cancel_lets_in_flight_spin_finish() {
        let mut autoplay = Autoplay::arm(1, 5);
        autoplay.begin_spin();
        assert!(autoplay.cancel());
        assert!(autoplay.is_active());

        let step = autoplay.complete_spin(Ok(100));
        assert_eq!(step, Some(AutoplayStep::Stopped(StopReason::Cancelled)));
        assert_eq!(autoplay.begin_spin(), None);
    }

    #[test]
    fn test_rejected_spin_stops_session() {
        let mut autoplay = Autoplay::arm(1, 5);
        autoplay.begin_spin();
        let step = autoplay.complete_spin(Err(RejectReason::SpinInProgress));
        assert_eq!(
            step,
            Some(AutoplayStep::Stopped(StopReason::Rejected(
                RejectReason::SpinInProgress
            )))
        );
    }

    #[test]
    fn test_complete_without_spin_is_ignored() {
        let mut autoplay = Autoplay::arm(1, 1);
        assert_eq!(autoplay.complete_spin(Ok(5)), None);
        assert_eq!(autoplay, Autoplay::arm(1, 1));
        assert_eq!(Autoplay::default().begin_spin(), None);
    }
}
