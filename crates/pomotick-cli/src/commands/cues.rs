use std::sync::Arc;

use clap::Subcommand;
use pomotick_core::dispatch::{NullHaptics, NullNotifier};
use pomotick_core::{Config, CueId, CuePolicy, DispatchStatus, EffectDispatcher};

use crate::desktop::ProcessCuePlayer;

#[derive(Subcommand)]
pub enum CuesAction {
    /// List the available ambient cues
    List {
        #[arg(long)]
        json: bool,
    },
    /// Play a cue for a few seconds
    Preview {
        /// Cue name, e.g. "rain1"
        cue: CueId,
    },
}

pub fn run(action: CuesAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CuesAction::List { json } => {
            let selected = Config::load_or_default().audio.cue;
            if json {
                let list: Vec<_> = CueId::ALL
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "id": c.key(),
                            "name": c.display_name(),
                            "description": c.description(),
                            "file": c.file_name(),
                            "selected": *c == selected,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for c in CueId::ALL {
                    let marker = if c == selected { "*" } else { " " };
                    println!("{marker} {:<7} {:<14} {}", c.key(), c.display_name(), c.description());
                }
            }
        }
        CuesAction::Preview { cue } => {
            let config = Config::load_or_default();
            let player = Arc::new(ProcessCuePlayer::new(config.sounds_dir()?));
            let dispatcher =
                EffectDispatcher::new(Arc::new(NullNotifier), player.clone(), Arc::new(NullHaptics));
            match dispatcher.preview(cue) {
                DispatchStatus::Delivered => {
                    std::thread::sleep(CuePolicy::PREVIEW_CLIP);
                    player.stop();
                }
                DispatchStatus::Dropped { reason } => {
                    return Err(format!("cannot preview {cue}: {reason}").into());
                }
                other => return Err(format!("unexpected preview status: {other:?}").into()),
            }
        }
    }
    Ok(())
}
