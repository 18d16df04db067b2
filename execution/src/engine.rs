//! The game state machine.
//!
//! [GameEngine] is the single owner of the player's [GameState]. Every mutation goes
//! through it, is written to the store right away, and rejected operations leave
//! the state untouched.
//!
//! A spin is resolved in full as soon as it is accepted, but it stays *in flight*
//! until [GameEngine::finish_spin] is called. Hosts that animate the reels call
//! [GameEngine::begin_spin], reveal the outcome, then finish. No other spin is
//! accepted in between. [GameEngine::spin] does both steps at once.

use crate::{
    autoplay::{Autoplay, AutoplayStep, StopReason},
    casino::{
        risk::{self, RiskOutcome, RiskVerdict},
        slot::{self, SlotEvaluation, SlotOutcome},
        RandomSource,
    },
    state::{Persistence, Snapshot, Store},
};
use highroller_types::casino::{
    GameState, HistoryEntry, RejectReason, WinStatus, RISK_COST, RISK_PAYOUT, STARTING_STAKE,
};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Wall-clock milliseconds since the unix epoch, as stamped on history entries.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

pub struct GameEngine<S: Store, R: RandomSource> {
    state: GameState,
    persistence: Persistence<S>,
    rng: R,
    autoplay: Autoplay,
    spin_in_flight: bool,
}

impl<S: Store, R: RandomSource> GameEngine<S, R> {
    /// Restore the player from `store`, falling back to a fresh stake.
    pub fn new(store: S, rng: R) -> Self {
        let persistence = Persistence::new(store);
        let Snapshot { balance, history } = persistence.load();
        let state = GameState::new(
            balance.unwrap_or(STARTING_STAKE),
            history.unwrap_or_default(),
        );
        let mut engine = Self {
            state,
            persistence,
            rng,
            autoplay: Autoplay::Idle,
            spin_in_flight: false,
        };
        if engine.state.check_win() {
            info!(balance = engine.state.balance, "win target already reached");
        }
        engine
    }

    /// Start from an exact balance with an empty history, ignoring stored records.
    #[cfg(any(test, feature = "mocks"))]
    pub fn seeded(store: S, rng: R, balance: u64) -> Self {
        let mut engine = Self::new(store, rng);
        engine.state = GameState::new(balance, Default::default());
        engine.state.check_win();
        engine.persist();
        engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    pub fn spin_in_flight(&self) -> bool {
        self.spin_in_flight
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    fn persist(&mut self) {
        if let Err(e) = self
            .persistence
            .save(self.state.balance, &self.state.history)
        {
            warn!(error = %e, "failed to persist game state, continuing in memory");
        }
    }

    fn check_win(&mut self) -> bool {
        let reached = self.state.check_win();
        if reached {
            info!(balance = self.state.balance, "win target reached");
        }
        reached
    }

    fn validate_bet(&self, bet: i64) -> Result<u64, RejectReason> {
        if !self.state.alive {
            return Err(RejectReason::GameOver);
        }
        let bet = u64::try_from(bet)
            .ok()
            .filter(|bet| *bet > 0)
            .ok_or(RejectReason::InvalidBet)?;
        if bet > self.state.balance {
            return Err(RejectReason::InsufficientBalance);
        }
        Ok(bet)
    }

    /// Spin and finish in one step.
    pub fn spin(&mut self, bet: i64) -> Result<SlotOutcome, RejectReason> {
        let outcome = self.begin_spin(bet)?;
        self.finish_spin();
        Ok(outcome)
    }

    /// Accept and resolve a spin, leaving it in flight.
    pub fn begin_spin(&mut self, bet: i64) -> Result<SlotOutcome, RejectReason> {
        if self.spin_in_flight {
            return Err(RejectReason::SpinInProgress);
        }
        let bet = self.validate_bet(bet)?;

        // Wager is at risk before the reels stop
        self.spin_in_flight = true;
        self.state.balance -= bet;

        let symbols = self.rng.draw_reels();
        let SlotEvaluation { multiplier, payout } = slot::evaluate(&symbols, bet);
        self.state.balance = self.state.balance.saturating_add(payout);
        self.state
            .history
            .append(HistoryEntry::slot(&symbols, payout, now_millis()));
        self.persist();
        let win_reached = self.check_win();

        debug!(
            bet,
            multiplier,
            payout,
            balance = self.state.balance,
            "spin resolved"
        );
        Ok(SlotOutcome {
            symbols,
            bet,
            multiplier,
            payout,
            balance: self.state.balance,
            win_reached,
        })
    }

    /// Release the spin in flight. If autoplay owned it, returns what autoplay does next.
    pub fn finish_spin(&mut self) -> Option<AutoplayStep> {
        if !self.spin_in_flight {
            return None;
        }
        self.spin_in_flight = false;
        let step = self.autoplay.complete_spin(Ok(self.state.balance))?;
        if let AutoplayStep::Stopped(reason) = step {
            info!(?reason, "autoplay stopped");
        }
        Some(step)
    }

    /// Play the risk event: pay the cost, roll, and die or collect.
    pub fn play_risk(&mut self) -> Result<RiskOutcome, RejectReason> {
        if !self.state.alive {
            return Err(RejectReason::GameOver);
        }
        if self.state.balance < RISK_COST {
            return Err(RejectReason::InsufficientBalance);
        }

        self.state.balance -= RISK_COST;
        self.persist();

        let roll = self.rng.roll_die();
        let verdict = risk::resolve(roll);
        match verdict {
            RiskVerdict::Died => {
                self.state.balance = 0;
                self.state.alive = false;
            }
            RiskVerdict::Survived => {
                self.state.balance = self.state.balance.saturating_add(RISK_PAYOUT);
            }
        }
        self.state.history.append(HistoryEntry::risk(
            verdict.text(),
            verdict.change(),
            now_millis(),
        ));
        self.persist();
        let win_reached = verdict == RiskVerdict::Survived && self.check_win();

        match verdict {
            RiskVerdict::Died => info!(roll, "risk event lost, game over"),
            RiskVerdict::Survived => debug!(roll, balance = self.state.balance, "risk event survived"),
        }
        Ok(RiskOutcome {
            roll,
            verdict,
            balance: self.state.balance,
            change: verdict.change(),
            win_reached,
        })
    }

    /// Start over with the starting stake. Valid in any state.
    pub fn reset(&mut self) {
        if self.autoplay.is_active() {
            self.autoplay = Autoplay::Stopped(StopReason::Cancelled);
            info!("autoplay stopped by reset");
        }
        self.spin_in_flight = false;
        self.state = GameState::default();
        self.persist();
        info!(balance = self.state.balance, "game reset");
    }

    /// Keep playing after reaching the win target.
    pub fn acknowledge_win(&mut self) -> Result<(), RejectReason> {
        if self.state.win != WinStatus::Pending {
            return Err(RejectReason::NoWinPending);
        }
        self.state.win = WinStatus::Acknowledged;
        debug!("win acknowledged");
        Ok(())
    }

    /// Fill an empty history with `entries`. Returns false if history already existed.
    pub fn seed_history(&mut self, entries: impl IntoIterator<Item = HistoryEntry>) -> bool {
        if !self.state.history.is_empty() {
            return false;
        }
        for entry in entries {
            self.state.history.append(entry);
        }
        if self.state.history.is_empty() {
            return false;
        }
        self.persist();
        debug!(entries = self.state.history.len(), "history seeded");
        true
    }

    /// Arm an autoplay session of `count` spins at `bet` each.
    pub fn start_autoplay(&mut self, bet: i64, count: u32) -> Result<(), RejectReason> {
        if self.autoplay.is_active() {
            return Err(RejectReason::AutoplayActive);
        }
        let bet = self.validate_bet(bet)?;
        if count == 0 {
            return Err(RejectReason::InvalidSpinCount);
        }
        self.autoplay = Autoplay::arm(bet, count);
        info!(bet, count, "autoplay armed");
        Ok(())
    }

    /// Stop autoplay before its next spin. A spin already in flight still completes.
    pub fn cancel_autoplay(&mut self) -> bool {
        let cancelled = self.autoplay.cancel();
        if cancelled {
            info!("autoplay cancelled");
        }
        cancelled
    }

    /// Begin the next autoplay spin, if a session is armed.
    ///
    /// A refused spin ends the session immediately.
    pub fn begin_autoplay_spin(&mut self) -> Option<Result<SlotOutcome, RejectReason>> {
        let bet = self.autoplay.begin_spin()?;
        let result = self.begin_spin(i64::try_from(bet).unwrap_or(i64::MAX));
        if let Err(reason) = result {
            self.autoplay.complete_spin(Err(reason));
            info!(%reason, "autoplay stopped");
        }
        Some(result)
    }

    /// Run one whole autoplay spin without pausing between begin and finish.
    pub fn autoplay_tick(&mut self) -> Option<(Result<SlotOutcome, RejectReason>, AutoplayStep)> {
        let result = self.begin_autoplay_spin()?;
        let step = match result {
            Ok(_) => self.finish_spin()?,
            Err(_) => AutoplayStep::Stopped(self.autoplay.stop_reason()?),
        };
        Some((result, step))
    }
}
