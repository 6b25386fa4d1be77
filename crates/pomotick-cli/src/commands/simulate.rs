use clap::Args;
use pomotick_core::{CueSettings, Effect, IntervalTimer, TimerConfig, WorkMode};
use serde::Serialize;

/// Steps an engine through whole seconds without waiting, following each
/// scheduled auto-start immediately.
#[derive(Args)]
pub struct SimulateArgs {
    /// Work interval: 25, 50 or 90
    #[arg(short, long, default_value = "work25")]
    mode: WorkMode,
    /// Number of one-second ticks to apply
    #[arg(short, long)]
    ticks: u64,
    /// Pause after this many ticks; later ticks are then ignored
    #[arg(long)]
    pause_after: Option<u64>,
    /// Do not follow scheduled break auto-starts
    #[arg(long)]
    no_auto_start: bool,
    /// Include per-tick cue effects in the output
    #[arg(long)]
    cues: bool,
}

#[derive(Serialize)]
struct SimulationReport {
    snapshot: pomotick_core::TimerSnapshot,
    effects: Vec<Effect>,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let report = simulate(&args);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn simulate(args: &SimulateArgs) -> SimulationReport {
    let mut engine = IntervalTimer::with_mode(TimerConfig::default(), args.mode);
    let cue = if args.cues {
        CueSettings::default()
    } else {
        CueSettings::muted()
    };

    let mut effects = engine.start();
    for n in 0..args.ticks {
        if args.pause_after == Some(n) {
            effects.extend(engine.pause());
        }
        let produced = engine.tick(&cue);
        for effect in &produced {
            if let Effect::ScheduleAutoStart { generation, .. } = effect {
                if !args.no_auto_start {
                    engine.auto_start(*generation);
                }
            }
        }
        effects.extend(produced);
    }

    SimulationReport {
        snapshot: engine.snapshot(),
        effects,
    }
}
