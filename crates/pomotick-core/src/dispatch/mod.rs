//! Side-effect dispatch.
//!
//! Executes the [`Effect`](crate::effects::Effect)s produced by the engine
//! against external collaborators, absorbing every failure.

pub mod executor;
pub mod log;
pub mod traits;

pub use executor::EffectDispatcher;
pub use log::{DispatchLog, DispatchResult, DispatchStatus};
pub use traits::{CuePlayer, Haptics, Notifier, NullCuePlayer, NullHaptics, NullNotifier};
