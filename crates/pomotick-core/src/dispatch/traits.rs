use std::time::Duration;

use crate::cues::CueId;
use crate::error::DispatchError;

/// Fires one-shot local alerts.
pub trait Notifier: Send + Sync {
    /// Show an alert immediately, with no trigger delay.
    fn schedule_immediate(&self, title: &str, body: &str) -> Result<(), DispatchError>;
}

/// Plays brief ambient cues.
///
/// Implementations must tolerate being called once per second; a new cue
/// stops any cue still playing.
pub trait CuePlayer: Send + Sync {
    fn play_short_cue(&self, cue: CueId, clip: Duration, volume: f32) -> Result<(), DispatchError>;
}

/// Vibration or the nearest equivalent the device offers.
pub trait Haptics: Send + Sync {
    /// `pattern_ms` alternates off/on durations, starting with off.
    fn vibrate(&self, pattern_ms: &[u64]) -> Result<(), DispatchError>;
}

/// Collaborator that accepts everything and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn schedule_immediate(&self, _title: &str, _body: &str) -> Result<(), DispatchError> {
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullCuePlayer;

impl CuePlayer for NullCuePlayer {
    fn play_short_cue(&self, _cue: CueId, _clip: Duration, _volume: f32) -> Result<(), DispatchError> {
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn vibrate(&self, _pattern_ms: &[u64]) -> Result<(), DispatchError> {
        Ok(())
    }
}
