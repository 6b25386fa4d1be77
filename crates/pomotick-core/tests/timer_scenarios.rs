//! End-to-end timer scenarios and countdown properties.
//!
//! Drives the engine directly, one call per simulated second.

use pomotick_core::{CueSettings, Effect, IntervalTimer, Phase, TimerConfig, WorkMode};
use proptest::prelude::*;

fn tick_n(engine: &mut IntervalTimer, n: u64) -> Vec<Effect> {
    let cue = CueSettings::muted();
    let mut effects = Vec::new();
    for _ in 0..n {
        effects.extend(engine.tick(&cue));
    }
    effects
}

#[test]
fn full_work25_session_enters_break() {
    let mut engine = IntervalTimer::default();
    engine.start();
    let effects = tick_n(&mut engine, 1500);

    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.seconds_remaining(), 300);
    assert_eq!(engine.completed_sessions(), 1);
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::ScheduleAutoStart { delay_ms: 2000, .. })));
}

#[test]
fn switching_to_work50_while_stopped() {
    let mut engine = IntervalTimer::default();
    engine.switch_work_mode(WorkMode::Work50);
    assert_eq!(engine.seconds_remaining(), 3000);
    assert_eq!(engine.phase(), Phase::Work);
}

#[test]
fn ticks_after_pause_are_ignored() {
    let mut engine = IntervalTimer::default();
    engine.start();
    tick_n(&mut engine, 10);
    engine.pause();
    tick_n(&mut engine, 5);
    assert_eq!(engine.seconds_remaining(), 1490);
}

#[test]
fn last_break_second_returns_to_stopped_work() {
    let config = TimerConfig::default();
    let mut engine = IntervalTimer::with_mode(config, WorkMode::Work50);
    engine.start();
    tick_n(&mut engine, 3000);
    engine.auto_start(engine.generation());
    tick_n(&mut engine, 599);
    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.seconds_remaining(), 1);

    let effects = tick_n(&mut engine, 1);
    assert_eq!(engine.phase(), Phase::Work);
    assert_eq!(engine.seconds_remaining(), 3000);
    assert!(!engine.is_running());
    assert_eq!(effects.len(), 1);
}

#[test]
fn sessions_accumulate_over_cycles() {
    let config = TimerConfig::new([4, 8, 12], [2, 3, 4]).unwrap();
    let mut engine = IntervalTimer::new(config);
    for cycle in 1..=3 {
        engine.start();
        tick_n(&mut engine, 4);
        engine.auto_start(engine.generation());
        tick_n(&mut engine, 2);
        assert_eq!(engine.completed_sessions(), cycle);
        assert_eq!(engine.phase(), Phase::Work);
    }
}

#[test]
fn break_does_not_count_a_session() {
    let config = TimerConfig::new([2, 2, 2], [3, 3, 3]).unwrap();
    let mut engine = IntervalTimer::new(config);
    engine.start();
    tick_n(&mut engine, 2);
    engine.auto_start(engine.generation());
    tick_n(&mut engine, 3);
    assert_eq!(engine.completed_sessions(), 1);
}

fn work_mode() -> impl Strategy<Value = WorkMode> {
    prop_oneof![
        Just(WorkMode::Work25),
        Just(WorkMode::Work50),
        Just(WorkMode::Work90),
    ]
}

proptest! {
    #[test]
    fn ticks_reduce_remaining_exactly(mode in work_mode(), frac in 0.0f64..1.0) {
        let config = TimerConfig::default();
        let total = config.seconds(mode);
        // Stay strictly before the transition tick.
        let n = ((total - 1) as f64 * frac) as u64;

        let mut engine = IntervalTimer::with_mode(config, mode);
        engine.start();
        let cue = CueSettings::muted();
        let mut last_pct = engine.progress_percent();
        for _ in 0..n {
            engine.tick(&cue);
            let pct = engine.progress_percent();
            prop_assert!(pct >= last_pct);
            last_pct = pct;
        }
        prop_assert_eq!(engine.seconds_remaining(), total - n);
    }

    #[test]
    fn reset_restores_full_phase(mode in work_mode(), ticks in 0u64..200, running in any::<bool>()) {
        let config = TimerConfig::default();
        let mut engine = IntervalTimer::with_mode(config, mode);
        engine.start();
        tick_n(&mut engine, ticks);
        if !running {
            engine.pause();
        }
        engine.reset();
        prop_assert!(!engine.is_running());
        prop_assert_eq!(engine.seconds_remaining(), config.duration_of(engine.phase(), mode));
    }

    #[test]
    fn switch_mode_is_noop_while_running(from in work_mode(), to in work_mode(), ticks in 0u64..100) {
        let mut engine = IntervalTimer::with_mode(TimerConfig::default(), from);
        engine.start();
        tick_n(&mut engine, ticks);
        let before = engine.state();
        engine.switch_work_mode(to);
        prop_assert_eq!(engine.state(), before);
    }

    #[test]
    fn remaining_never_exceeds_phase_length(mode in work_mode(), ticks in 0u64..400) {
        let config = TimerConfig::new([120, 180, 240], [30, 45, 60]).unwrap();
        let mut engine = IntervalTimer::with_mode(config, mode);
        let cue = CueSettings::muted();
        engine.start();
        for _ in 0..ticks {
            engine.tick(&cue);
            if !engine.is_running() {
                engine.auto_start(engine.generation());
                engine.start();
            }
            prop_assert!(engine.seconds_remaining() >= 1);
            prop_assert!(engine.seconds_remaining() <= engine.total_seconds());
        }
    }
}
