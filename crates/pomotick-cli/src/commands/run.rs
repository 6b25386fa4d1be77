use std::io::Write;
use std::sync::Arc;

use clap::Args;
use pomotick_core::{
    timer::phase_indicator, Config, CueId, CueSettings, EffectDispatcher, IntervalTimer,
    SessionCommand, SessionOptions, TimerSession, TimerSnapshot, WorkMode,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::desktop::{DesktopNotifier, ProcessCuePlayer, TerminalBell};

#[derive(Args)]
pub struct RunArgs {
    /// Work interval: 25, 50 or 90 (defaults to the configured mode)
    #[arg(short, long)]
    mode: Option<WorkMode>,
    /// Start counting down immediately
    #[arg(long)]
    start: bool,
    /// Disable ambient cues for this session
    #[arg(long)]
    mute: bool,
    /// Print one JSON snapshot per state change instead of a status line
    #[arg(long)]
    json: bool,
}

const HELP: &str = "commands: s(tart) p(ause) r(eset) m(ode) <25|50|90> c(ue) <name> mute unmute q(uit)";

enum Input {
    Command(SessionCommand),
    Quit,
    Help,
    Unknown(String),
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(args, config))
}

async fn session(args: RunArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mode = args.mode.unwrap_or(config.timer.default_mode);
    let engine = IntervalTimer::with_mode(config.timer_config(), mode);

    let player = Arc::new(ProcessCuePlayer::new(config.sounds_dir()?));
    let dispatcher = EffectDispatcher::new(
        Arc::new(DesktopNotifier),
        player.clone(),
        Arc::new(TerminalBell),
    )
    .with_notifications(config.notifications.enabled)
    .with_vibration(config.notifications.vibration);

    let mut cue = config.cue_settings();
    if args.mute {
        cue.enabled = false;
    }
    let mut cue = playable(cue, &player);
    let options = SessionOptions {
        cue,
        ..SessionOptions::default()
    };
    let session = TimerSession::spawn(engine, dispatcher, options);
    let mut snapshots = session.subscribe();

    if !args.json {
        eprintln!("{HELP}");
    }
    render(&session.snapshot(), args.json)?;
    if args.start {
        session.start().await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = snapshots.borrow_and_update().clone();
                render(&snap, args.json)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line, &mut cue) {
                    Input::Command(SessionCommand::SetCue(wanted)) => {
                        cue = playable(wanted, &player);
                        session.send(SessionCommand::SetCue(cue)).await?;
                    }
                    Input::Command(cmd) => session.send(cmd).await?,
                    Input::Quit => break,
                    Input::Help => eprintln!("{HELP}"),
                    Input::Unknown(what) => eprintln!("\nunknown input: {what}\n{HELP}"),
                }
            }
        }
    }

    let engine = session.shutdown().await?;
    if !args.json {
        println!();
        println!("completed sessions: {}", engine.completed_sessions());
    }
    Ok(())
}

/// Mutes cues whose file is not installed, with one warning instead of a
/// failed cue every tick.
fn playable(mut cue: CueSettings, player: &ProcessCuePlayer) -> CueSettings {
    if cue.enabled && !player.has_cue(cue.cue) {
        warn!(
            path = %player.cue_path(cue.cue).display(),
            "cue file not found, ambient cues muted"
        );
        cue.enabled = false;
    }
    cue
}

fn parse_input(line: &str, cue: &mut CueSettings) -> Input {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Input::Help;
    };
    let arg = words.next();
    match (head, arg) {
        ("s" | "start", _) => Input::Command(SessionCommand::Start),
        ("p" | "pause", _) => Input::Command(SessionCommand::Pause),
        ("r" | "reset", _) => Input::Command(SessionCommand::Reset),
        ("m" | "mode", Some(mode)) => match mode.parse() {
            Ok(mode) => Input::Command(SessionCommand::SwitchMode(mode)),
            Err(e) => Input::Unknown(e.to_string()),
        },
        ("c" | "cue", Some(name)) => match name.parse::<CueId>() {
            Ok(id) => {
                cue.cue = id;
                Input::Command(SessionCommand::SetCue(*cue))
            }
            Err(e) => Input::Unknown(e.to_string()),
        },
        ("mute", _) => {
            cue.enabled = false;
            Input::Command(SessionCommand::SetCue(*cue))
        }
        ("unmute", _) => {
            cue.enabled = true;
            Input::Command(SessionCommand::SetCue(*cue))
        }
        ("q" | "quit" | "exit", _) => Input::Quit,
        ("h" | "help" | "?", _) => Input::Help,
        (other, _) => Input::Unknown(other.to_string()),
    }
}

fn render(snap: &TimerSnapshot, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout();
    if json {
        writeln!(out, "{}", serde_json::to_string(snap)?)?;
    } else {
        write!(
            out,
            "\r\x1b[2K{} {}  {}  {:>3}%  done: {}  [{}]",
            if snap.running { "▶" } else { "⏸" },
            snap.formatted_time,
            snap.phase_label,
            snap.progress_percent,
            snap.completed_sessions,
            phase_indicator(snap.phase),
        )?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_switch() {
        let mut cue = CueSettings::default();
        assert!(matches!(
            parse_input("m 50", &mut cue),
            Input::Command(SessionCommand::SwitchMode(WorkMode::Work50))
        ));
    }

    #[test]
    fn cue_change_updates_settings() {
        let mut cue = CueSettings::default();
        parse_input("cue rain2", &mut cue);
        assert_eq!(cue.cue, CueId::Rain2);
        parse_input("mute", &mut cue);
        assert!(!cue.enabled);
    }

    #[test]
    fn missing_cue_file_mutes_cues() {
        let dir = tempfile::tempdir().unwrap();
        let player = ProcessCuePlayer::new(dir.path().to_path_buf());
        let cue = playable(CueSettings::default(), &player);
        assert!(!cue.enabled);
        assert_eq!(cue.cue, CueId::Clock);
    }

    #[test]
    fn installed_cue_stays_enabled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CueId::Water.file_name()), b"").unwrap();
        let player = ProcessCuePlayer::new(dir.path().to_path_buf());
        let wanted = CueSettings {
            cue: CueId::Water,
            ..CueSettings::default()
        };
        assert!(playable(wanted, &player).enabled);
        let missing = CueSettings {
            cue: CueId::Rain2,
            ..CueSettings::default()
        };
        assert!(!playable(missing, &player).enabled);
    }

    #[test]
    fn rejects_unknown_mode() {
        let mut cue = CueSettings::default();
        assert!(matches!(parse_input("mode 45", &mut cue), Input::Unknown(_)));
    }

    #[test]
    fn blank_line_shows_help() {
        let mut cue = CueSettings::default();
        assert!(matches!(parse_input("   ", &mut cue), Input::Help));
    }
}
