//! One tokio task per game.
//!
//! The task is the only writer of its `Game`. Callers send actions through a
//! `GameHandle` and observe the game through a `watch` channel of snapshots.
//! The task also drives what the player does not: the tension delay after a
//! lock, the reveal delay before feedback, and the per-question countdown.
//!
//! A delayed transition remembers the phase and epoch it was scheduled for and
//! is dropped if the game has moved on by the time it fires.

use std::time::Duration;

use rand::Rng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::{TimerPolicy, Timing};
use crate::error::SessionError;
use crate::game::{Action, Game, Phase};
use crate::protocol::Snapshot;

const COMMAND_BUFFER: usize = 32;
const TICK: Duration = Duration::from_secs(1);

enum Command {
    Apply {
        action: Action,
        reply: oneshot::Sender<Result<Snapshot, SessionError>>,
    },
}

/// Cheap, cloneable access to a running game.
#[derive(Clone, Debug)]
pub struct GameHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
}

impl GameHandle {
    /// Move `game` onto its own task. The task ends once every handle is dropped.
    pub fn spawn<R>(game: Game<R>, timing: Timing, timer: TimerPolicy) -> Self
    where
        R: Rng + Send + 'static,
    {
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let (snap_tx, snapshots) = watch::channel(Snapshot::capture(&game, None));
        let runner = Runner {
            game,
            timing,
            timer,
            pending: None,
            seconds_remaining: None,
            countdown_epoch: None,
            ticking: false,
            snapshots: snap_tx,
        };
        tokio::spawn(runner.run(rx));
        Self { commands, snapshots }
    }

    /// Apply a player action and return the resulting snapshot.
    pub async fn apply(&self, action: Action) -> Result<Snapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Apply { action, reply })
            .await
            .map_err(|_| SessionError::Stopped)?;
        rx.await.map_err(|_| SessionError::Stopped)?
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Instant,
    phase: Phase,
    epoch: u64,
}

struct Runner<R> {
    game: Game<R>,
    timing: Timing,
    timer: TimerPolicy,
    pending: Option<Pending>,
    seconds_remaining: Option<u32>,
    /// Epoch at which the current countdown was armed.
    countdown_epoch: Option<u64>,
    /// Whether the countdown was running at the last sync.
    ticking: bool,
    snapshots: watch::Sender<Snapshot>,
}

impl<R: Rng> Runner<R> {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.sync(&mut ticker);

        loop {
            let due = self.pending.map(|p| p.due);
            let counting = self.counting();
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(Command::Apply { action, reply }) => {
                        let result = self.game.apply(action);
                        self.sync(&mut ticker);
                        let _ = reply.send(result.map(|_| self.snapshots.borrow().clone()).map_err(SessionError::from));
                        continue;
                    }
                    None => break,
                },
                () = time::sleep_until(due.unwrap_or_else(Instant::now)), if due.is_some() => self.fire_pending(),
                _ = ticker.tick(), if counting => self.tick(),
            }
            self.sync(&mut ticker);
        }
        debug!(target: "game", "Runner stopped");
    }

    fn counting(&self) -> bool {
        let state = self.game.state();
        state.phase == Phase::Playing && !state.is_paused && self.seconds_remaining.is_some_and(|s| s > 0)
    }

    fn tick(&mut self) {
        if !self.counting() {
            return;
        }
        if let Some(s) = self.seconds_remaining.as_mut() {
            *s -= 1;
            if *s == 0 {
                info!(target: "game", position = self.game.state().position, "Countdown reached zero");
                self.game.time_expired();
            }
        }
    }

    fn fire_pending(&mut self) {
        let Some(p) = self.pending.take() else {
            return;
        };
        if self.game.phase() != p.phase || self.game.epoch() != p.epoch {
            debug!(target: "game", scheduled_for = ?p.phase, now = ?self.game.phase(), "Discarded stale delayed transition");
            return;
        }
        match p.phase {
            Phase::Locked => self.game.reveal_answer(),
            Phase::Revealed => self.game.proceed_from_reveal(),
            _ => false,
        };
    }

    /// Reconcile timers with the game's current phase, then publish.
    fn sync(&mut self, ticker: &mut Interval) {
        let phase = self.game.phase();
        let epoch = self.game.epoch();

        let delay = match phase {
            Phase::Locked => Some(self.timing.tension_delay()),
            Phase::Revealed => Some(self.timing.reveal_delay()),
            _ => None,
        };
        self.pending = match (self.pending, delay) {
            (Some(p), Some(_)) if p.phase == phase && p.epoch == epoch => Some(p),
            (_, Some(delay)) => Some(Pending { due: Instant::now() + delay, phase, epoch }),
            (_, None) => None,
        };

        match self.game.current_question() {
            None => {
                self.seconds_remaining = None;
                self.countdown_epoch = None;
            }
            Some(q) if phase == Phase::Playing && self.countdown_epoch != Some(epoch) => {
                self.seconds_remaining = Some(self.timer.seconds_for(q.difficulty));
                self.countdown_epoch = Some(epoch);
                ticker.reset();
            }
            Some(_) => {}
        }

        // A resumed countdown gets a full second before its next tick.
        let counting = self.counting();
        if counting && !self.ticking {
            ticker.reset();
        }
        self.ticking = counting;

        let next = Snapshot::capture(&self.game, self.seconds_remaining);
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
