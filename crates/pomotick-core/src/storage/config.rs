//! TOML-based preferences.
//!
//! Stores user preferences including:
//! - Ambient cue selection and volume
//! - Notification and vibration switches
//! - Default work mode and an optional custom duration table
//!
//! Preferences are stored at `~/.config/pomotick/config.toml`. Timer state
//! itself is never written here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::cues::{CueId, CueSettings};
use crate::error::ConfigError;
use crate::timer::{TimerConfig, WorkMode};

/// Ambient audio configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub cue: CueId,
    /// Percent, 0-100.
    #[serde(default = "default_volume")]
    pub volume: u32,
    /// Directory holding the cue sound files.
    /// Falls back to `<data dir>/sounds` when unset.
    #[serde(default)]
    pub sounds_dir: Option<PathBuf>,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub vibration: bool,
}

/// Timer defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerPrefs {
    #[serde(default)]
    pub default_mode: WorkMode,
    /// Custom duration table override, in seconds.
    #[serde(default)]
    pub durations: Option<TimerConfig>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomotick/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub timer: TimerPrefs,
}

fn default_true() -> bool {
    true
}
fn default_volume() -> u32 {
    20
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cue: CueId::default(),
            volume: default_volume(),
            sounds_dir: None,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            vibration: true,
        }
    }
}

impl Default for TimerPrefs {
    fn default() -> Self {
        Self {
            default_mode: WorkMode::Work25,
            durations: None,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => {
                        serde_json::Value::Bool(value.parse::<bool>().map_err(|_| invalid())?)
                    }
                    serde_json::Value::Number(_) => {
                        serde_json::Value::Number(value.parse::<u64>().map_err(|_| invalid())?.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|_| invalid())?
                    }
                    // Unset optional: structured if it parses, otherwise a plain string.
                    serde_json::Value::Null => serde_json::from_str(value)
                        .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                if let Some(durations) = &cfg.timer.durations {
                    durations.validate()?;
                }
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let mut json = serde_json::to_value(&*self).map_err(|_| invalid())?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|_| invalid())?;
        if updated.audio.volume > 100 {
            return Err(invalid());
        }
        if let Some(durations) = &updated.timer.durations {
            durations.validate()?;
        }
        *self = updated;
        Ok(())
    }

    /// Duration table in effect: the custom override or the standard one.
    pub fn timer_config(&self) -> TimerConfig {
        self.timer.durations.unwrap_or_default()
    }

    pub fn cue_settings(&self) -> CueSettings {
        CueSettings {
            enabled: self.audio.enabled,
            cue: self.audio.cue,
            volume: self.audio.volume.min(100) as f32 / 100.0,
        }
    }

    pub fn sounds_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.audio.sounds_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("sounds")),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.audio.enabled);
        assert_eq!(parsed.audio.volume, 20);
        assert_eq!(parsed.timer.default_mode, WorkMode::Work25);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.audio.cue, CueId::Clock);
        assert!(parsed.notifications.vibration);
        assert!(parsed.timer.durations.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("audio.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("audio.volume").as_deref(), Some("20"));
        assert_eq!(cfg.get("audio.cue").as_deref(), Some("clock"));
        assert_eq!(cfg.get("timer.default_mode").as_deref(), Some("work25"));
        assert!(cfg.get("audio.missing_key").is_none());
    }

    #[test]
    fn set_updates_enum_keys() {
        let mut cfg = Config::default();
        cfg.set("audio.cue", "rain2").unwrap();
        cfg.set("timer.default_mode", "work90").unwrap();
        assert_eq!(cfg.audio.cue, CueId::Rain2);
        assert_eq!(cfg.timer.default_mode, WorkMode::Work90);
    }

    #[test]
    fn set_rejects_unknown_cue() {
        let mut cfg = Config::default();
        let err = cfg.set("audio.cue", "thunder").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg.audio.cue, CueId::Clock);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("audio.nonexistent_key", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_bool() {
        let mut cfg = Config::default();
        assert!(cfg.set("notifications.enabled", "sometimes").is_err());
    }

    #[test]
    fn set_rejects_volume_over_100() {
        let mut cfg = Config::default();
        assert!(cfg.set("audio.volume", "150").is_err());
        cfg.set("audio.volume", "40").unwrap();
        assert!((cfg.cue_settings().volume - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn custom_durations_are_validated() {
        let mut cfg = Config::default();
        let zero = r#"{"work25":0,"work50":3000,"work90":5400,"break5":300,"break10":600,"break15":900}"#;
        assert!(cfg.set("timer.durations", zero).is_err());

        let short = r#"{"work25":60,"work50":120,"work90":180,"break5":10,"break10":20,"break15":30}"#;
        cfg.set("timer.durations", short).unwrap();
        assert_eq!(cfg.timer_config().work25, 60);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.audio.volume, 20);
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("audio.enabled", "false").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.audio.enabled);
        assert!(!loaded.cue_settings().enabled);
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[audio\nenabled = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
