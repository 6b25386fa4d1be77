//! Derived display values.
//!
//! Pure functions of timer state. Strings come from the bundled (Uzbek)
//! locale.

use serde::{Deserialize, Serialize};

use super::durations::{BreakMode, Phase, WorkMode};

pub const WORK_FINISHED_TITLE: &str = "Ish vaqti tugadi! 🎉";
pub const WORK_FINISHED_BODY: &str = "Tanaffus vaqti boshlandi. Dam oling!";
pub const BREAK_FINISHED_TITLE: &str = "Tanaffus tugadi! ⏰";
pub const BREAK_FINISHED_BODY: &str = "Ish vaqti boshlash uchun tayyor!";

pub const BREAK_COLOR: &str = "#4ECDC4";

/// `MM:SS`, zero padded. Minutes are not wrapped into hours.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Whole percent of `total` already elapsed, rounded down.
pub fn progress_percent(total: u64, remaining: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let elapsed = total.saturating_sub(remaining);
    (elapsed.saturating_mul(100) / total).min(100) as u8
}

pub fn phase_label(phase: Phase, mode: WorkMode) -> &'static str {
    match phase {
        Phase::Work => match mode {
            WorkMode::Work25 => "Fokus vaqti (25 min)",
            WorkMode::Work50 => "Chuqur ish (50 min)",
            WorkMode::Work90 => "Maksimal fokus (90 min)",
        },
        Phase::Break => match mode.break_mode() {
            BreakMode::Break5 => "Qisqa tanaffus (5 min)",
            BreakMode::Break10 => "O'rta tanaffus (10 min)",
            BreakMode::Break15 => "Uzun tanaffus (15 min)",
        },
    }
}

pub fn phase_color(phase: Phase, mode: WorkMode) -> &'static str {
    match phase {
        Phase::Work => match mode {
            WorkMode::Work25 => "#FF6B6B",
            WorkMode::Work50 => "#FF8E53",
            WorkMode::Work90 => "#FF4757",
        },
        Phase::Break => BREAK_COLOR,
    }
}

/// Short caption shown under the countdown.
pub fn phase_indicator(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => "💼 Ish vaqti",
        Phase::Break => "☕ Tanaffus",
    }
}

/// Everything the render layer reads after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub work_mode: WorkMode,
    pub seconds_remaining: u64,
    pub total_seconds: u64,
    pub running: bool,
    pub completed_sessions: u64,
    pub formatted_time: String,
    pub progress_percent: u8,
    pub phase_label: String,
    pub phase_color: String,
    /// Whether the start control should be offered.
    pub show_start: bool,
}
