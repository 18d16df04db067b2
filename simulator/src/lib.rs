use highroller_execution::{
    casino::{risk::RiskOutcome, slot::SlotOutcome},
    now_millis, Autoplay, AutoplayStep, GameEngine, RandomSource, StopReason, Store,
};
use highroller_types::casino::{reel_line, GameState, HistoryEntry, RejectReason, Symbol};
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{sync::broadcast, time::sleep};

pub mod command;
pub mod config;

pub use command::{Bet, Command, CommandError};
pub use config::{Config, ConfigError, ValidatedConfig};

/// Delays that pace the game for a human watching it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// Time for the reels to settle before a spin is revealed.
    pub reel: Duration,
    /// Pause between autoplay spins.
    pub autoplay: Duration,
    /// Suspense before the risk verdict is revealed.
    pub risk_reveal: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            reel: Duration::from_millis(2_200),
            autoplay: Duration::from_millis(600),
            risk_reveal: Duration::from_millis(900),
        }
    }
}

/// Events published to every subscriber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Update {
    Spin(SlotOutcome),
    Risk(RiskOutcome),
    WinReached { balance: u64 },
    GameOver,
    AutoplayStopped(StopReason),
    Reset { balance: u64 },
    /// A command was refused. `code` is the stable number for `reason`.
    Rejected { code: u8, reason: RejectReason },
}

impl Update {
    pub fn rejected(reason: RejectReason) -> Self {
        Update::Rejected {
            code: reason.code(),
            reason,
        }
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Spin(outcome) => write!(
                f,
                "[ {} ]  {}  balance: {}",
                reel_line(&outcome.symbols),
                outcome,
                outcome.balance
            ),
            Update::Risk(outcome) => write!(f, "{}  balance: {}", outcome, outcome.balance),
            Update::WinReached { balance } => write!(
                f,
                "*** You reached {balance} tokens! Type 'ack' to keep playing. ***"
            ),
            Update::GameOver => f.write_str("Game over. Type 'restart' to play again."),
            Update::AutoplayStopped(reason) => write!(f, "{reason}"),
            Update::Reset { balance } => write!(f, "Fresh start with {balance} tokens."),
            Update::Rejected { code, reason } => write!(f, "Refused: {reason} (error {code})"),
        }
    }
}

/// Sample entries shown to a first-time player.
pub fn demo_history() -> [HistoryEntry; 2] {
    let ts = now_millis();
    [
        HistoryEntry::slot(&[Symbol::Diamond; 3], 200, ts),
        HistoryEntry::slot(&[Symbol::Cherry, Symbol::Lemon, Symbol::Watermelon], 0, ts),
    ]
}

struct Table<S: Store, R: RandomSource> {
    engine: GameEngine<S, R>,
    /// Bumped by every reset. Spins begun before a reset are not finished after it.
    resets: u64,
    /// Bumped by every autoplay start. Stale drivers exit on mismatch.
    session: u64,
}

/// Shared handle driving one [GameEngine] with pacing and broadcast updates.
pub struct Simulator<S: Store, R: RandomSource> {
    table: Arc<Mutex<Table<S, R>>>,
    pacing: Pacing,
    update_tx: broadcast::Sender<Update>,
}

impl<S: Store, R: RandomSource> Clone for Simulator<S, R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            pacing: self.pacing,
            update_tx: self.update_tx.clone(),
        }
    }
}

impl<S, R> Simulator<S, R>
where
    S: Store + Send + 'static,
    R: RandomSource + Send + 'static,
{
    pub fn new(engine: GameEngine<S, R>, pacing: Pacing) -> Self {
        let (update_tx, _) = broadcast::channel(1024);
        let table = Arc::new(Mutex::new(Table {
            engine,
            resets: 0,
            session: 0,
        }));

        Self {
            table,
            pacing,
            update_tx,
        }
    }

    fn table(&self) -> MutexGuard<'_, Table<S, R>> {
        self.table.lock().unwrap_or_else(|e| {
            tracing::error!("Engine lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }

    fn publish(&self, update: Update) {
        if let Err(e) = self.update_tx.send(update) {
            tracing::warn!("Failed to broadcast update (no subscribers): {}", e);
        }
    }

    /// Report a refused command to subscribers and hand the reason back.
    fn refuse(&self, reason: RejectReason) -> RejectReason {
        self.publish(Update::rejected(reason));
        reason
    }

    fn publish_spin(&self, outcome: SlotOutcome) {
        let win = outcome.win_reached.then_some(outcome.balance);
        self.publish(Update::Spin(outcome));
        if let Some(balance) = win {
            self.publish(Update::WinReached { balance });
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Update> {
        self.update_tx.subscribe()
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn state(&self) -> GameState {
        self.table().engine.snapshot()
    }

    pub fn autoplay(&self) -> Autoplay {
        *self.table().engine.autoplay()
    }

    pub fn spin_in_flight(&self) -> bool {
        self.table().engine.spin_in_flight()
    }

    /// Seed the sample history if the player has none.
    pub fn seed_demo_history(&self) -> bool {
        self.table().engine.seed_history(demo_history())
    }

    /// Spin once and wait for the reels to settle.
    pub async fn spin(&self, bet: i64) -> Result<SlotOutcome, RejectReason> {
        let (outcome, resets) = {
            let mut table = self.table();
            let outcome = table.engine.begin_spin(bet).map_err(|e| self.refuse(e))?;
            (outcome, table.resets)
        };
        sleep(self.pacing.reel).await;

        {
            let mut table = self.table();
            if table.resets != resets {
                return Ok(outcome);
            }
            table.engine.finish_spin();
        }
        self.publish_spin(outcome.clone());
        Ok(outcome)
    }

    /// Play the risk event. The verdict is revealed after a pause.
    pub async fn play_risk(&self) -> Result<RiskOutcome, RejectReason> {
        let outcome = self
            .table()
            .engine
            .play_risk()
            .map_err(|e| self.refuse(e))?;
        sleep(self.pacing.risk_reveal).await;

        self.publish(Update::Risk(outcome));
        if outcome.win_reached {
            self.publish(Update::WinReached {
                balance: outcome.balance,
            });
        }
        if !outcome.survived() {
            self.publish(Update::GameOver);
        }
        Ok(outcome)
    }

    pub fn acknowledge_win(&self) -> Result<(), RejectReason> {
        self.table()
            .engine
            .acknowledge_win()
            .map_err(|e| self.refuse(e))
    }

    /// Start an autoplay session in the background. Must be called within a tokio runtime.
    pub fn start_autoplay(&self, bet: i64, count: u32) -> Result<(), RejectReason> {
        let session = {
            let mut table = self.table();
            table
                .engine
                .start_autoplay(bet, count)
                .map_err(|e| self.refuse(e))?;
            table.session += 1;
            table.session
        };
        tokio::spawn(self.clone().drive_autoplay(session));
        Ok(())
    }

    /// Stop autoplay. A spin already in flight still settles first.
    pub fn cancel_autoplay(&self) -> bool {
        let (cancelled, stopped) = {
            let mut table = self.table();
            let cancelled = table.engine.cancel_autoplay();
            (cancelled, table.engine.autoplay().stop_reason())
        };

        // Between spins the session ends right away; otherwise the driver reports it.
        if cancelled {
            if let Some(reason) = stopped {
                self.publish(Update::AutoplayStopped(reason));
            }
        }
        cancelled
    }

    /// Start over with the starting stake.
    pub fn reset(&self) {
        let (interrupted, balance) = {
            let mut table = self.table();
            let interrupted = table.engine.autoplay().is_active();
            table.engine.reset();
            table.resets += 1;
            (interrupted, table.engine.state().balance)
        };
        if interrupted {
            self.publish(Update::AutoplayStopped(StopReason::Cancelled));
        }
        self.publish(Update::Reset { balance });
    }

    async fn drive_autoplay(self, session: u64) {
        loop {
            let (next, resets) = {
                let mut table = self.table();
                if table.session != session {
                    return;
                }
                (table.engine.begin_autoplay_spin(), table.resets)
            };
            let outcome = match next {
                None => return,
                Some(Ok(outcome)) => outcome,
                Some(Err(reason)) => {
                    self.publish(Update::AutoplayStopped(StopReason::Rejected(reason)));
                    return;
                }
            };
            sleep(self.pacing.reel).await;

            let step = {
                let mut table = self.table();
                if table.resets != resets {
                    return;
                }
                table.engine.finish_spin()
            };
            self.publish_spin(outcome);

            match step {
                Some(AutoplayStep::Continue { .. }) => sleep(self.pacing.autoplay).await,
                Some(AutoplayStep::Stopped(reason)) => {
                    self.publish(Update::AutoplayStopped(reason));
                    return;
                }
                None => return,
            }
        }
    }
}
