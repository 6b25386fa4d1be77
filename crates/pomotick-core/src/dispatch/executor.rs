//! Effect execution.
//!
//! Runs effects against the collaborators and records what happened.
//! Failures are logged and absorbed here; nothing propagates back into the
//! tick path.

use std::sync::Arc;

use tracing::{debug, warn};

use super::log::{DispatchLog, DispatchResult, DispatchStatus};
use super::traits::{CuePlayer, Haptics, Notifier, NullCuePlayer, NullHaptics, NullNotifier};
use crate::cues::{CueId, CuePolicy};
use crate::effects::{Effect, CUE_FALLBACK_PATTERN_MS};

/// Executes effects against the configured collaborators.
#[derive(Clone)]
pub struct EffectDispatcher {
    notifier: Arc<dyn Notifier>,
    cues: Arc<dyn CuePlayer>,
    haptics: Arc<dyn Haptics>,
    notifications_enabled: bool,
    vibration_enabled: bool,
}

impl EffectDispatcher {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        cues: Arc<dyn CuePlayer>,
        haptics: Arc<dyn Haptics>,
    ) -> Self {
        Self {
            notifier,
            cues,
            haptics,
            notifications_enabled: true,
            vibration_enabled: true,
        }
    }

    /// Dispatcher whose collaborators all succeed silently.
    pub fn null() -> Self {
        Self::new(
            Arc::new(NullNotifier),
            Arc::new(NullCuePlayer),
            Arc::new(NullHaptics),
        )
    }

    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    pub fn with_vibration(mut self, enabled: bool) -> Self {
        self.vibration_enabled = enabled;
        self
    }

    /// Execute a batch of effects and return the log
    pub fn dispatch(&self, effects: Vec<Effect>) -> DispatchLog {
        let results = effects
            .iter()
            .map(|effect| DispatchResult {
                effect: effect.kind().to_string(),
                status: self.dispatch_one(effect),
            })
            .collect();
        DispatchLog::new(results)
    }

    /// Play a cue outside the countdown, e.g. from a picker.
    pub fn preview(&self, cue: CueId) -> DispatchStatus {
        match self
            .cues
            .play_short_cue(cue, CuePolicy::PREVIEW_CLIP, CuePolicy::PREVIEW_VOLUME)
        {
            Ok(()) => DispatchStatus::Delivered,
            Err(e) => {
                warn!(%cue, "cue preview failed: {e}");
                DispatchStatus::Dropped {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn dispatch_one(&self, effect: &Effect) -> DispatchStatus {
        match effect {
            Effect::Notify { title, body } => {
                if !self.notifications_enabled {
                    return skipped("notifications disabled");
                }
                match self.notifier.schedule_immediate(title, body) {
                    Ok(()) => DispatchStatus::Delivered,
                    Err(e) => {
                        warn!("notification dropped: {e}");
                        DispatchStatus::Dropped {
                            reason: e.to_string(),
                        }
                    }
                }
            }
            Effect::PlayCue { cue, volume } => {
                match self.cues.play_short_cue(*cue, CuePolicy::TICK_CLIP, *volume) {
                    Ok(()) => DispatchStatus::Delivered,
                    Err(e) => {
                        warn!(%cue, "cue failed, falling back to vibration: {e}");
                        match self.buzz(&CUE_FALLBACK_PATTERN_MS) {
                            Ok(()) => DispatchStatus::Fallback {
                                reason: e.to_string(),
                            },
                            Err(fallback) => DispatchStatus::Dropped {
                                reason: format!("{e}; fallback: {fallback}"),
                            },
                        }
                    }
                }
            }
            Effect::Vibrate { pattern_ms } => match self.buzz(pattern_ms) {
                Ok(()) => DispatchStatus::Delivered,
                Err(e) => {
                    warn!("vibration dropped: {e}");
                    DispatchStatus::Dropped { reason: e }
                }
            },
            Effect::ScheduleAutoStart { generation, .. } => {
                debug!(generation, "auto-start left to the session driver");
                skipped("scheduled by caller")
            }
        }
    }

    fn buzz(&self, pattern_ms: &[u64]) -> Result<(), String> {
        if !self.vibration_enabled {
            return Err("vibration disabled".to_string());
        }
        self.haptics.vibrate(pattern_ms).map_err(|e| e.to_string())
    }
}

impl Default for EffectDispatcher {
    fn default() -> Self {
        Self::null()
    }
}

fn skipped(reason: &str) -> DispatchStatus {
    DispatchStatus::Skipped {
        reason: reason.to_string(),
    }
}
