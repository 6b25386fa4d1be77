use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selectable work interval length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    #[default]
    Work25,
    Work50,
    Work90,
}

impl WorkMode {
    pub const ALL: [WorkMode; 3] = [WorkMode::Work25, WorkMode::Work50, WorkMode::Work90];

    /// The break that follows this work interval.
    pub fn break_mode(&self) -> BreakMode {
        match self {
            WorkMode::Work25 => BreakMode::Break5,
            WorkMode::Work50 => BreakMode::Break10,
            WorkMode::Work90 => BreakMode::Break15,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            WorkMode::Work25 => "work25",
            WorkMode::Work50 => "work50",
            WorkMode::Work90 => "work90",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for WorkMode {
    type Err = ConfigError;

    /// Accepts the table key (`work50`) or the bare minute count (`50`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work25" | "25" => Ok(WorkMode::Work25),
            "work50" | "50" => Ok(WorkMode::Work50),
            "work90" | "90" => Ok(WorkMode::Work90),
            other => Err(ConfigError::UnknownIdentifier(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakMode {
    Break5,
    Break10,
    Break15,
}

impl BreakMode {
    pub fn key(&self) -> &'static str {
        match self {
            BreakMode::Break5 => "break5",
            BreakMode::Break10 => "break10",
            BreakMode::Break15 => "break15",
        }
    }
}

impl fmt::Display for BreakMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BreakMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "break5" => Ok(BreakMode::Break5),
            "break10" => Ok(BreakMode::Break10),
            "break15" => Ok(BreakMode::Break15),
            other => Err(ConfigError::UnknownIdentifier(other.to_string())),
        }
    }
}

/// Named entry of the duration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationKey {
    Work(WorkMode),
    Break(BreakMode),
}

impl From<WorkMode> for DurationKey {
    fn from(mode: WorkMode) -> Self {
        DurationKey::Work(mode)
    }
}

impl From<BreakMode> for DurationKey {
    fn from(mode: BreakMode) -> Self {
        DurationKey::Break(mode)
    }
}

/// Duration table in seconds, keyed by work and break modes.
///
/// Immutable once built; the engine holds its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work25: u64,
    pub work50: u64,
    pub work90: u64,
    pub break5: u64,
    pub break10: u64,
    pub break15: u64,
}

impl TimerConfig {
    /// Build a custom table. Every entry must be at least one second.
    pub fn new(
        work: [u64; 3],
        breaks: [u64; 3],
    ) -> Result<Self, ConfigError> {
        let cfg = Self {
            work25: work[0],
            work50: work[1],
            work90: work[2],
            break5: breaks[0],
            break10: breaks[1],
            break15: breaks[2],
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = [
            ("work25", self.work25),
            ("work50", self.work50),
            ("work90", self.work90),
            ("break5", self.break5),
            ("break10", self.break10),
            ("break15", self.break15),
        ];
        match entries.iter().find(|(_, secs)| *secs == 0) {
            Some((name, _)) => Err(ConfigError::InvalidDuration((*name).to_string())),
            None => Ok(()),
        }
    }

    pub fn seconds(&self, key: impl Into<DurationKey>) -> u64 {
        match key.into() {
            DurationKey::Work(WorkMode::Work25) => self.work25,
            DurationKey::Work(WorkMode::Work50) => self.work50,
            DurationKey::Work(WorkMode::Work90) => self.work90,
            DurationKey::Break(BreakMode::Break5) => self.break5,
            DurationKey::Break(BreakMode::Break10) => self.break10,
            DurationKey::Break(BreakMode::Break15) => self.break15,
        }
    }

    /// Full length of `phase` when the selected work interval is `mode`.
    pub fn duration_of(&self, phase: Phase, mode: WorkMode) -> u64 {
        match phase {
            Phase::Work => self.seconds(mode),
            Phase::Break => self.seconds(mode.break_mode()),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work25: 25 * 60,
            work50: 50 * 60,
            work90: 90 * 60,
            break5: 5 * 60,
            break10: 10 * 60,
            break15: 15 * 60,
        }
    }
}
