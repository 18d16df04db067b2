//! Three-reel slot evaluation.
//!
//! Multiplier table, highest first:
//! - three jackpot symbols: 50x
//! - any other triple: 10x
//! - any two matching reels: 2x
//! - otherwise: nothing

use highroller_types::casino::{
    Symbol, JACKPOT_MULTIPLIER, PAIR_MULTIPLIER, REELS, TRIPLE_MULTIPLIER,
};
use std::fmt;

/// Score of a reel line for a given wager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotEvaluation {
    pub multiplier: u64,
    pub payout: u64,
}

/// Multiplier for a resolved reel line.
pub fn multiplier(symbols: &[Symbol; REELS]) -> u64 {
    let [a, b, c] = *symbols;
    if a == b && b == c {
        if a.is_jackpot() {
            JACKPOT_MULTIPLIER
        } else {
            TRIPLE_MULTIPLIER
        }
    } else if a == b || b == c || a == c {
        PAIR_MULTIPLIER
    } else {
        0
    }
}

/// Score a reel line. The caller validates that `bet` is positive.
pub fn evaluate(symbols: &[Symbol; REELS], bet: u64) -> SlotEvaluation {
    let multiplier = multiplier(symbols);
    SlotEvaluation {
        multiplier,
        payout: bet.saturating_mul(multiplier),
    }
}

/// A resolved spin, as reported to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotOutcome {
    pub symbols: [Symbol; REELS],
    pub bet: u64,
    pub multiplier: u64,
    pub payout: u64,
    /// Balance after the payout was credited.
    pub balance: u64,
    /// True if this spin raised the win signal.
    pub win_reached: bool,
}

impl SlotOutcome {
    pub fn is_win(&self) -> bool {
        self.payout > 0
    }

    /// Net effect on the balance (payout minus wager).
    pub fn net(&self) -> i64 {
        let net = i128::from(self.payout) - i128::from(self.bet);
        i64::try_from(net).unwrap_or(if net > 0 { i64::MAX } else { i64::MIN })
    }
}

impl fmt::Display for SlotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_win() {
            write!(f, "You won {} ({}×)!", self.payout, self.multiplier)
        } else {
            write!(f, "You lost {}. Try again.", self.bet)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    #[test]
    fn test_jackpot_triple() {
        assert_eq!(multiplier(&[Diamond, Diamond, Diamond]), 50);
    }

    #[test]
    fn test_other_triples() {
        for symbol in Symbol::ALL.into_iter().filter(|s| !s.is_jackpot()) {
            assert_eq!(multiplier(&[symbol; 3]), 10, "{symbol}");
        }
    }

    #[test]
    fn test_pairs_in_any_position() {
        assert_eq!(multiplier(&[Cherry, Cherry, Bell]), 2);
        assert_eq!(multiplier(&[Bell, Cherry, Cherry]), 2);
        assert_eq!(multiplier(&[Cherry, Bell, Cherry]), 2);
        // Jackpot pairs pay like any other pair.
        assert_eq!(multiplier(&[Diamond, Seven, Diamond]), 2);
    }

    #[test]
    fn test_all_distinct() {
        assert_eq!(multiplier(&[Cherry, Lemon, Watermelon]), 0);
        assert_eq!(multiplier(&[Diamond, Seven, Star]), 0);
    }

    #[test]
    fn test_payout_is_bet_times_multiplier() {
        assert_eq!(
            evaluate(&[Star, Star, Lemon], 7),
            SlotEvaluation {
                multiplier: 2,
                payout: 14
            }
        );
        assert_eq!(evaluate(&[Bell, Bell, Bell], 3).payout, 30);
        assert_eq!(evaluate(&[Diamond, Diamond, Diamond], 50).payout, 2500);
        assert_eq!(evaluate(&[Cherry, Lemon, Bell], 1000).payout, 0);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        // Every triple, a handful of bets: same inputs, same answer.
        for a in Symbol::ALL {
            for b in Symbol::ALL {
                for c in Symbol::ALL {
                    for bet in [1, 7, 99, 1_000_000] {
                        let line = [a, b, c];
                        let first = evaluate(&line, bet);
                        assert_eq!(first, evaluate(&line, bet));
                        assert_eq!(first.payout, bet * first.multiplier);
                    }
                }
            }
        }
    }

    #[test]
    fn test_outcome_message() {
        let win = SlotOutcome {
            symbols: [Star, Star, Lemon],
            bet: 7,
            multiplier: 2,
            payout: 14,
            balance: 107,
            win_reached: false,
        };
        assert_eq!(win.to_string(), "You won 14 (2×)!");
        assert_eq!(win.net(), 7);

        let loss = SlotOutcome {
            symbols: [Cherry, Lemon, Bell],
            payout: 0,
            multiplier: 0,
            ..win
        };
        assert_eq!(loss.to_string(), "You lost 7. Try again.");
        assert_eq!(loss.net(), -7);
    }

    #[test]
    fn test_net_of_huge_jackpot_stays_positive() {
        let bet = i64::MAX as u64;
        let jackpot = SlotOutcome {
            symbols: [Diamond; 3],
            bet,
            multiplier: 50,
            payout: evaluate(&[Diamond; 3], bet).payout,
            balance: u64::MAX,
            win_reached: false,
        };
        assert_eq!(jackpot.payout, u64::MAX);
        assert_eq!(jackpot.net(), i64::MAX);

        let loss = SlotOutcome {
            payout: 0,
            multiplier: 0,
            bet: u64::MAX,
            ..jackpot
        };
        assert_eq!(loss.net(), i64::MIN);
    }
}
