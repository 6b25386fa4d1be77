//! Async session driver.
//!
//! Owns one [`IntervalTimer`] on a tokio task and connects it to the outside:
//!
//! - a 1 second interval ticks the engine, only while it is running
//! - commands arrive over an mpsc channel
//! - snapshots are published on a watch channel after every change
//! - delayed auto-starts are sleeping tasks, aborted when superseded
//! - all other effects go to the [`EffectDispatcher`] on the blocking pool,
//!   fire-and-forget, so a slow or failing collaborator never delays a tick

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::cues::CueSettings;
use crate::dispatch::EffectDispatcher;
use crate::effects::Effect;
use crate::error::{CoreError, Result};
use crate::timer::{IntervalTimer, TimerSnapshot, WorkMode};

/// User intents accepted by a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Start,
    Pause,
    Reset,
    SwitchMode(WorkMode),
    SetCue(CueSettings),
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub tick_period: Duration,
    pub cue: CueSettings,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            cue: CueSettings::default(),
        }
    }
}

/// Handle to a spawned session.
pub struct TimerSession {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<TimerSnapshot>,
    task: JoinHandle<IntervalTimer>,
}

impl TimerSession {
    /// Spawn the driver on the current tokio runtime.
    pub fn spawn(engine: IntervalTimer, dispatcher: EffectDispatcher, options: SessionOptions) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (snap_tx, snap_rx) = watch::channel(engine.snapshot());
        let driver = Driver {
            engine,
            dispatcher,
            options,
            snapshots: snap_tx,
            ticker: None,
            pending_auto_start: None,
        };
        let task = tokio::spawn(driver.run(cmd_rx));
        Self {
            commands: cmd_tx,
            snapshots: snap_rx,
            task,
        }
    }

    pub async fn send(&self, command: SessionCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CoreError::SessionClosed)
    }

    pub async fn start(&self) -> Result<()> {
        self.send(SessionCommand::Start).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.send(SessionCommand::Pause).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.send(SessionCommand::Reset).await
    }

    pub async fn switch_mode(&self, mode: WorkMode) -> Result<()> {
        self.send(SessionCommand::SwitchMode(mode)).await
    }

    /// Latest published state.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the driver and hand back the engine in its final state.
    pub async fn shutdown(self) -> Result<IntervalTimer> {
        // The driver may already be gone; the join below reports that.
        let _ = self.commands.send(SessionCommand::Shutdown).await;
        self.task.await.map_err(|_| CoreError::SessionClosed)
    }
}

enum Wake {
    Command(SessionCommand),
    Closed,
    AutoStart(u64),
    Tick,
}

struct Driver {
    engine: IntervalTimer,
    dispatcher: EffectDispatcher,
    options: SessionOptions,
    snapshots: watch::Sender<TimerSnapshot>,
    ticker: Option<Interval>,
    pending_auto_start: Option<(u64, JoinHandle<()>)>,
}

impl Driver {
    async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) -> IntervalTimer {
        info!(mode = %self.engine.work_mode(), "timer session started");
        let (auto_tx, mut auto_rx) = mpsc::unbounded_channel::<u64>();

        loop {
            let wake = tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(cmd) => Wake::Command(cmd),
                    None => Wake::Closed,
                },
                Some(generation) = auto_rx.recv() => Wake::AutoStart(generation),
                _ = next_tick(&mut self.ticker) => Wake::Tick,
            };

            let effects = match wake {
                Wake::Closed | Wake::Command(SessionCommand::Shutdown) => break,
                Wake::Command(cmd) => self.apply(cmd),
                Wake::AutoStart(generation) => self.engine.auto_start(generation),
                Wake::Tick => self.engine.tick(&self.options.cue),
            };

            self.handle_effects(effects, &auto_tx);
            self.sync_ticker();
            self.publish();
        }

        if let Some((_, task)) = self.pending_auto_start.take() {
            task.abort();
        }
        info!(sessions = self.engine.completed_sessions(), "timer session stopped");
        self.engine
    }

    fn apply(&mut self, cmd: SessionCommand) -> Vec<Effect> {
        debug!(?cmd, "session command");
        match cmd {
            SessionCommand::Start => self.engine.start(),
            SessionCommand::Pause => self.engine.pause(),
            SessionCommand::Reset => self.engine.reset(),
            SessionCommand::SwitchMode(mode) => self.engine.switch_work_mode(mode),
            SessionCommand::SetCue(cue) => {
                self.options.cue = cue;
                Vec::new()
            }
            SessionCommand::Shutdown => Vec::new(),
        }
    }

    fn handle_effects(&mut self, effects: Vec<Effect>, auto_tx: &mpsc::UnboundedSender<u64>) {
        // Anything that moved the generation makes a pending auto-start stale.
        if let Some((generation, task)) = &self.pending_auto_start {
            if *generation != self.engine.generation() {
                task.abort();
                self.pending_auto_start = None;
            }
        }

        let mut dispatchable = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::ScheduleAutoStart { generation, delay_ms } => {
                    self.schedule_auto_start(generation, delay_ms, auto_tx.clone());
                }
                other => dispatchable.push(other),
            }
        }
        if dispatchable.is_empty() {
            return;
        }

        let dispatcher = self.dispatcher.clone();
        tokio::task::spawn_blocking(move || {
            let log = dispatcher.dispatch(dispatchable);
            // Each failure was already logged by the dispatcher.
            if log.dropped_count() > 0 || log.fallback_count() > 0 {
                debug!(
                    dropped = log.dropped_count(),
                    fallback = log.fallback_count(),
                    "some effects were not delivered"
                );
            }
        });
    }

    fn schedule_auto_start(&mut self, generation: u64, delay_ms: u64, tx: mpsc::UnboundedSender<u64>) {
        if let Some((_, task)) = self.pending_auto_start.take() {
            task.abort();
        }
        debug!(generation, delay_ms, "auto-start scheduled");
        let task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let _ = tx.send(generation);
        });
        self.pending_auto_start = Some((generation, task));
    }

    /// Tick only while the engine runs; restarting counts a full period.
    fn sync_ticker(&mut self) {
        match (self.engine.is_running(), self.ticker.is_some()) {
            (true, false) => {
                let period = self.options.tick_period;
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.ticker = Some(ticker);
            }
            (false, true) => self.ticker = None,
            _ => {}
        }
    }

    fn publish(&self) {
        let snapshot = self.engine.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
