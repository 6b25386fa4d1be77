use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cues::CueId;

/// Three short pulses when a break begins.
pub const BREAK_PATTERN_MS: [u64; 6] = [0, 200, 100, 200, 100, 200];

/// Single 30 ms buzz used in place of a cue that failed to play.
pub const CUE_FALLBACK_PATTERN_MS: [u64; 2] = [0, 30];

/// Delay between a work interval finishing and the break starting on its own.
pub const AUTO_START_DELAY: Duration = Duration::from_millis(2000);

/// Side-effect request produced by an engine transition.
///
/// The engine never performs these itself; the caller executes them and
/// feeds any follow-up (such as a delayed auto-start) back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Fire a one-shot local alert with no delay.
    Notify { title: String, body: String },
    /// Play one short ambient cue.
    PlayCue { cue: CueId, volume: f32 },
    /// On/off millisecond durations, starting with an "off" gap.
    Vibrate { pattern_ms: Vec<u64> },
    /// Call `IntervalTimer::auto_start(generation)` after `delay_ms`.
    ScheduleAutoStart { generation: u64, delay_ms: u64 },
}

impl Effect {
    pub fn notify(title: impl Into<String>, body: impl Into<String>) -> Self {
        Effect::Notify {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn vibrate(pattern: &[u64]) -> Self {
        Effect::Vibrate {
            pattern_ms: pattern.to_vec(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Effect::Notify { .. } => "notify",
            Effect::PlayCue { .. } => "play_cue",
            Effect::Vibrate { .. } => "vibrate",
            Effect::ScheduleAutoStart { .. } => "schedule_auto_start",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_serialize_with_type_tag() {
        let json = serde_json::to_value(Effect::vibrate(&BREAK_PATTERN_MS)).unwrap();
        assert_eq!(json["type"], "vibrate");
        assert_eq!(json["pattern_ms"].as_array().unwrap().len(), 6);
    }

    fn on_time(pattern: &[u64]) -> u64 {
        pattern.iter().skip(1).step_by(2).sum()
    }

    #[test]
    fn patterns_start_with_off_gap_and_buzz() {
        assert_eq!(CUE_FALLBACK_PATTERN_MS[0], 0);
        assert_eq!(on_time(&CUE_FALLBACK_PATTERN_MS), 30);
        assert_eq!(on_time(&BREAK_PATTERN_MS), 600);
    }

    #[test]
    fn auto_start_delay_is_two_seconds() {
        assert_eq!(AUTO_START_DELAY.as_secs(), 2);
    }
}
