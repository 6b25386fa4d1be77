mod durations;
mod engine;
mod presentation;

pub use durations::{BreakMode, DurationKey, Phase, TimerConfig, WorkMode};
pub use engine::{IntervalTimer, TimerState};
pub use presentation::{
    format_time, phase_color, phase_indicator, phase_label, progress_percent, TimerSnapshot,
    BREAK_FINISHED_BODY, BREAK_FINISHED_TITLE, WORK_FINISHED_BODY, WORK_FINISHED_TITLE,
};
