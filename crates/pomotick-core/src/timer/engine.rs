//! Interval timer engine.
//!
//! A two-phase (work/break) countdown that owns no threads and no clock.
//! The caller drives it with `tick()` once per second while it is running
//! and executes the [`Effect`]s each call returns.
//!
//! ## State Transitions
//!
//! ```text
//! Work --(countdown ends)--> Break   (session counted, break auto-starts after 2s)
//! Break --(countdown ends)--> Work   (stopped, waits for start)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = IntervalTimer::new(TimerConfig::default());
//! engine.start();
//! // Once per second while running:
//! let effects = engine.tick(&CueSettings::default());
//! ```
//!
//! Requests whose precondition does not hold are no-ops that return no
//! effects, so out-of-order input cannot corrupt the countdown.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::durations::{Phase, TimerConfig, WorkMode};
use super::presentation::{self, TimerSnapshot};
use crate::cues::CueSettings;
use crate::effects::{Effect, AUTO_START_DELAY, BREAK_PATTERN_MS};

/// Mutable countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub work_mode: WorkMode,
    pub phase: Phase,
    pub seconds_remaining: u64,
    pub running: bool,
    pub completed_sessions: u64,
}

/// Core timer engine.
///
/// `generation` changes on every transition and every manual intervention.
/// A delayed auto-start carries the generation it was scheduled under and
/// is ignored if anything happened since.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    config: TimerConfig,
    state: TimerState,
    generation: u64,
}

impl IntervalTimer {
    /// Starts stopped, in `Work` with the 25 minute mode selected.
    pub fn new(config: TimerConfig) -> Self {
        Self::with_mode(config, WorkMode::Work25)
    }

    pub fn with_mode(config: TimerConfig, work_mode: WorkMode) -> Self {
        Self {
            config,
            state: TimerState {
                work_mode,
                phase: Phase::Work,
                seconds_remaining: config.seconds(work_mode),
                running: false,
                completed_sessions: 0,
            },
            generation: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn work_mode(&self) -> WorkMode {
        self.state.work_mode
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.state.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn completed_sessions(&self) -> u64 {
        self.state.completed_sessions
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Full length of the current phase.
    pub fn total_seconds(&self) -> u64 {
        self.config.duration_of(self.state.phase, self.state.work_mode)
    }

    pub fn formatted_time(&self) -> String {
        presentation::format_time(self.state.seconds_remaining)
    }

    pub fn progress_percent(&self) -> u8 {
        presentation::progress_percent(self.total_seconds(), self.state.seconds_remaining)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let s = &self.state;
        TimerSnapshot {
            phase: s.phase,
            work_mode: s.work_mode,
            seconds_remaining: s.seconds_remaining,
            total_seconds: self.total_seconds(),
            running: s.running,
            completed_sessions: s.completed_sessions,
            formatted_time: self.formatted_time(),
            progress_percent: self.progress_percent(),
            phase_label: presentation::phase_label(s.phase, s.work_mode).to_string(),
            phase_color: presentation::phase_color(s.phase, s.work_mode).to_string(),
            show_start: !s.running,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Vec<Effect> {
        if self.state.running {
            return Vec::new();
        }
        self.state.running = true;
        self.bump();
        debug!(phase = %self.state.phase, remaining = self.state.seconds_remaining, "timer started");
        Vec::new()
    }

    pub fn pause(&mut self) -> Vec<Effect> {
        if !self.state.running {
            return Vec::new();
        }
        self.state.running = false;
        self.bump();
        debug!(remaining = self.state.seconds_remaining, "timer paused");
        Vec::new()
    }

    /// Restart the current phase from its full length, stopped.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.state.running = false;
        self.state.seconds_remaining = self.total_seconds();
        self.bump();
        debug!(phase = %self.state.phase, "timer reset");
        Vec::new()
    }

    /// Select a different work interval. Only honoured in a stopped `Work` phase.
    pub fn switch_work_mode(&mut self, mode: WorkMode) -> Vec<Effect> {
        if self.state.running || self.state.phase != Phase::Work {
            debug!(%mode, "work mode change ignored");
            return Vec::new();
        }
        self.state.work_mode = mode;
        self.state.phase = Phase::Work;
        self.state.seconds_remaining = self.config.seconds(mode);
        self.state.running = false;
        self.bump();
        debug!(%mode, "work mode switched");
        Vec::new()
    }

    /// Advance one second. Ignored while stopped.
    pub fn tick(&mut self, cue: &CueSettings) -> Vec<Effect> {
        if !self.state.running {
            return Vec::new();
        }
        if self.state.seconds_remaining > 1 {
            self.state.seconds_remaining -= 1;
            if cue.enabled {
                return vec![Effect::PlayCue {
                    cue: cue.cue,
                    volume: cue.volume,
                }];
            }
            return Vec::new();
        }
        match self.state.phase {
            Phase::Work => self.finish_work(),
            Phase::Break => self.finish_break(),
        }
    }

    /// Begin the break on its own, unless anything changed since `generation`.
    pub fn auto_start(&mut self, generation: u64) -> Vec<Effect> {
        if generation != self.generation
            || self.state.phase != Phase::Break
            || self.state.running
        {
            debug!(generation, current = self.generation, "stale auto-start dropped");
            return Vec::new();
        }
        self.state.running = true;
        debug!("break auto-started");
        Vec::new()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn finish_work(&mut self) -> Vec<Effect> {
        let break_mode = self.state.work_mode.break_mode();
        self.state.completed_sessions += 1;
        self.state.phase = Phase::Break;
        self.state.seconds_remaining = self.config.seconds(break_mode);
        self.state.running = false;
        self.bump();
        debug!(
            sessions = self.state.completed_sessions,
            %break_mode,
            "work finished"
        );
        vec![
            Effect::notify(
                presentation::WORK_FINISHED_TITLE,
                presentation::WORK_FINISHED_BODY,
            ),
            Effect::vibrate(&BREAK_PATTERN_MS),
            Effect::ScheduleAutoStart {
                generation: self.generation,
                delay_ms: AUTO_START_DELAY.as_millis() as u64,
            },
        ]
    }

    fn finish_break(&mut self) -> Vec<Effect> {
        self.state.phase = Phase::Work;
        self.state.seconds_remaining = self.config.seconds(self.state.work_mode);
        self.state.running = false;
        self.bump();
        debug!("break finished");
        vec![Effect::notify(
            presentation::BREAK_FINISHED_TITLE,
            presentation::BREAK_FINISHED_BODY,
        )]
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
