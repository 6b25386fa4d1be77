//! # Pomotick Core Library
//!
//! Core logic for the Pomotick work/break interval timer. The CLI binary is
//! a thin front end over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a two-phase countdown state machine with no clock of
//!   its own; the caller invokes `tick()` once per second
//! - **Effects**: every transition returns side-effect requests instead of
//!   performing them
//! - **Dispatch**: collaborator traits for notifications, audio cues and
//!   haptics, plus a dispatcher that absorbs their failures
//! - **Session**: a tokio driver that owns an engine, ticks it, and handles
//!   the delayed break auto-start
//!
//! ## Key Components
//!
//! - [`IntervalTimer`]: Core timer state machine
//! - [`EffectDispatcher`]: Executes effects against collaborators
//! - [`TimerSession`]: Async driver
//! - [`Config`]: Preferences (not timer state)

pub mod cues;
pub mod dispatch;
pub mod effects;
pub mod error;
pub mod session;
pub mod storage;
pub mod timer;

pub use cues::{CueId, CuePolicy, CueSettings};
pub use dispatch::{CuePlayer, DispatchLog, DispatchStatus, EffectDispatcher, Haptics, Notifier};
pub use effects::{Effect, AUTO_START_DELAY, BREAK_PATTERN_MS, CUE_FALLBACK_PATTERN_MS};
pub use error::{ConfigError, CoreError, DispatchError};
pub use session::{SessionCommand, SessionOptions, TimerSession};
pub use storage::Config;
pub use timer::{BreakMode, IntervalTimer, Phase, TimerConfig, TimerSnapshot, TimerState, WorkMode};
