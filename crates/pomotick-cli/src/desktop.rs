//! Desktop implementations of the timer's collaborators.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use notify_rust::Notification;
use pomotick_core::dispatch::{CuePlayer, Haptics, Notifier};
use pomotick_core::{CueId, DispatchError};
use tracing::debug;

/// Desktop notification through the system notification daemon.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn schedule_immediate(&self, title: &str, body: &str) -> Result<(), DispatchError> {
        Notification::new()
            .summary(title)
            .body(body)
            .appname("pomotick")
            .icon("alarm-clock")
            .show()
            .map(|_| ())
            .map_err(|e| DispatchError::Notification(e.to_string()))
    }
}

/// Players tried in order; the first one found on PATH wins.
const PLAYERS: [&str; 3] = ["paplay", "afplay", "aplay"];

/// Plays cue files by spawning a system audio player.
///
/// Starting a cue kills the one before it, and each clip is cut off after
/// its length even if nothing replaces it.
pub struct ProcessCuePlayer {
    sounds_dir: PathBuf,
    current: Arc<Mutex<Option<Child>>>,
}

impl ProcessCuePlayer {
    pub fn new(sounds_dir: PathBuf) -> Self {
        Self {
            sounds_dir,
            current: Arc::new(Mutex::new(None)),
        }
    }

    pub fn cue_path(&self, cue: CueId) -> PathBuf {
        self.sounds_dir.join(cue.file_name())
    }

    pub fn has_cue(&self, cue: CueId) -> bool {
        self.cue_path(cue).is_file()
    }

    pub fn stop(&self) {
        if let Ok(mut current) = self.current.lock() {
            kill(&mut current);
        }
    }

    fn spawn_player(&self, file: &Path, volume: f32) -> Result<Child, DispatchError> {
        let mut last_err = None;
        for player in PLAYERS {
            let mut cmd = Command::new(player);
            if player == "paplay" {
                // paplay volume is linear, 65536 = 100%.
                cmd.arg(format!("--volume={}", (volume.clamp(0.0, 1.0) * 65536.0) as u32));
            } else if player == "afplay" {
                cmd.args(["-v", &format!("{:.2}", volume.clamp(0.0, 1.0))]);
            }
            match cmd
                .arg(file)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => return Ok(child),
                Err(e) => last_err = Some(format!("{player}: {e}")),
            }
        }
        Err(DispatchError::Audio(
            last_err.unwrap_or_else(|| "no audio player".to_string()),
        ))
    }
}

fn kill(current: &mut Option<Child>) {
    if let Some(mut child) = current.take() {
        let _ = child.kill();
        let _ = child.wait();
    }
}

impl CuePlayer for ProcessCuePlayer {
    fn play_short_cue(&self, cue: CueId, clip: Duration, volume: f32) -> Result<(), DispatchError> {
        let file = self.cue_path(cue);
        if !file.is_file() {
            return Err(DispatchError::Audio(format!("missing {}", file.display())));
        }

        // Kill, spawn and store under one guard so overlapping calls
        // cannot orphan a player.
        let pid = {
            let mut current = self
                .current
                .lock()
                .map_err(|_| DispatchError::Audio("player state poisoned".to_string()))?;
            kill(&mut current);
            let child = self.spawn_player(&file, volume)?;
            let pid = child.id();
            *current = Some(child);
            pid
        };
        debug!(%cue, pid, "cue playing");

        let current = Arc::clone(&self.current);
        std::thread::spawn(move || {
            std::thread::sleep(clip);
            if let Ok(mut current) = current.lock() {
                if current.as_ref().map(Child::id) == Some(pid) {
                    kill(&mut current);
                }
            }
        });
        Ok(())
    }
}

impl Drop for ProcessCuePlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Terminals cannot vibrate; ring the bell once per "on" segment instead.
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn vibrate(&self, pattern_ms: &[u64]) -> Result<(), DispatchError> {
        let mut err = std::io::stderr();
        for (i, ms) in pattern_ms.iter().enumerate() {
            if i % 2 == 1 {
                err.write_all(b"\x07")
                    .and_then(|_| err.flush())
                    .map_err(|e| DispatchError::Haptic(e.to_string()))?;
            }
            std::thread::sleep(Duration::from_millis(*ms));
        }
        Ok(())
    }
}
