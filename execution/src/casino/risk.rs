//! Russian roulette side game.
//!
//! The player pays a fixed cost and rolls one die. The lethal face ends the game
//! with the balance forced to zero; any other face pays a fixed amount.

use highroller_types::casino::{LETHAL_ROLL, RISK_COST, RISK_PAYOUT};
use std::fmt;

pub const DIED_TEXT: &str = "Roulette - DIED";
pub const SURVIVED_TEXT: &str = "Roulette - Survived";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskVerdict {
    Died,
    Survived,
}

impl RiskVerdict {
    /// Ledger change recorded for this verdict.
    pub fn change(self) -> i64 {
        match self {
            RiskVerdict::Died => -(RISK_COST as i64),
            RiskVerdict::Survived => RISK_PAYOUT as i64 - RISK_COST as i64,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            RiskVerdict::Died => DIED_TEXT,
            RiskVerdict::Survived => SURVIVED_TEXT,
        }
    }
}

/// Map a die roll to its verdict.
pub fn resolve(roll: u8) -> RiskVerdict {
    if roll == LETHAL_ROLL {
        RiskVerdict::Died
    } else {
        RiskVerdict::Survived
    }
}

/// A resolved risk event, as reported to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiskOutcome {
    pub roll: u8,
    pub verdict: RiskVerdict,
    /// Balance after the event resolved.
    pub balance: u64,
    pub change: i64,
    /// True if surviving raised the win signal.
    pub win_reached: bool,
}

impl RiskOutcome {
    pub fn survived(&self) -> bool {
        self.verdict == RiskVerdict::Survived
    }
}

impl fmt::Display for RiskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verdict {
            RiskVerdict::Survived => write!(f, "You survived! Payout: {RISK_PAYOUT}"),
            RiskVerdict::Died => write!(f, "Rolled a {}. You died.", self.roll),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_face_is_lethal() {
        assert_eq!(resolve(1), RiskVerdict::Died);
        for roll in 2..=6 {
            assert_eq!(resolve(roll), RiskVerdict::Survived);
        }
    }

    #[test]
    fn test_verdict_changes() {
        assert_eq!(RiskVerdict::Died.change(), -1000);
        assert_eq!(RiskVerdict::Survived.change(), 1500);
    }
}
