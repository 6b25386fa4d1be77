//! Ambient audio cues.
//!
//! A fixed set of short sounds played once per second while the timer runs.
//! Which cue plays, and whether any plays at all, is caller configuration
//! passed into each tick rather than engine state.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueId {
    #[default]
    Clock,
    Birds1,
    Birds2,
    Rain1,
    Rain2,
    Water,
}

impl CueId {
    pub const ALL: [CueId; 6] = [
        CueId::Clock,
        CueId::Birds1,
        CueId::Birds2,
        CueId::Rain1,
        CueId::Rain2,
        CueId::Water,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CueId::Clock => "clock",
            CueId::Birds1 => "birds1",
            CueId::Birds2 => "birds2",
            CueId::Rain1 => "rain1",
            CueId::Rain2 => "rain2",
            CueId::Water => "water",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CueId::Clock => "Soat tovushi",
            CueId::Birds1 => "Qushlar 1",
            CueId::Birds2 => "Qushlar 2",
            CueId::Rain1 => "Yomg'ir 1",
            CueId::Rain2 => "Yomg'ir 2",
            CueId::Water => "Suv tovushi",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CueId::Clock => "Klassik soat tik-tak tovushi",
            CueId::Birds1 => "Tabiat ovozlari - qushlar sayroqi",
            CueId::Birds2 => "Turli qushlarning ovozi",
            CueId::Rain1 => "Tinch yomg'ir tovushi",
            CueId::Rain2 => "Kuchli yomg'ir ovozi",
            CueId::Water => "Oqayotgan suv ovozi",
        }
    }

    /// File name inside the sounds directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            CueId::Clock => "Clock.mp3",
            CueId::Birds1 => "Birds sound 1.mp3",
            CueId::Birds2 => "Birds sound 2.mp3",
            CueId::Rain1 => "Rain 1.mp3",
            CueId::Rain2 => "Rain 2.mp3",
            CueId::Water => "Water sound.mp3",
        }
    }
}

impl fmt::Display for CueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CueId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        CueId::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or(ConfigError::UnknownIdentifier(s))
    }
}

/// Per-tick cue configuration owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueSettings {
    pub enabled: bool,
    pub cue: CueId,
    /// 0.0 ..= 1.0
    pub volume: f32,
}

impl Default for CueSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cue: CueId::Clock,
            volume: CuePolicy::TICK_VOLUME,
        }
    }
}

impl CueSettings {
    pub fn muted() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Playback policy shared by every cue player.
///
/// A new cue stops the previous one before it starts, so once-per-second
/// playback never overlaps.
pub struct CuePolicy;

impl CuePolicy {
    pub const TICK_CLIP: Duration = Duration::from_millis(500);
    pub const TICK_VOLUME: f32 = 0.2;
    pub const PREVIEW_CLIP: Duration = Duration::from_millis(3000);
    pub const PREVIEW_VOLUME: f32 = 0.4;
}
