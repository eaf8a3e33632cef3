//! Configuration management for the event wizard.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::validation::CalendarZone;
use chrono::FixedOffset;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Largest UTC offset accepted, in minutes (just under a day)
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Invalid configuration value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// UTC offset outside ±23:59.
    #[error("UTC offset of {0} minutes is out of range")]
    OffsetOutOfRange(i32),

    /// Time zone name not in the IANA database.
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// Draft path is empty.
    #[error("Draft path must not be empty")]
    EmptyDraftPath,
}

/// Wizard configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Checkpoint automatically after edits (default: true)
    pub auto_save: bool,
    /// Quiet period after the last edit before auto-saving, in milliseconds;
    /// `0` saves on every edit (default: 1000)
    pub auto_save_debounce_ms: u64,
    /// IANA zone whose calendar days group meal sessions, e.g.
    /// `Europe/Berlin` (default: host local time zone)
    pub time_zone: Option<String>,
    /// Constant offset in minutes east of UTC; overrides `time_zone`
    pub utc_offset_minutes: Option<i32>,
    /// Where the file-backed draft store writes (default: `event-draft.json`)
    pub draft_path: PathBuf,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            auto_save: true,
            auto_save_debounce_ms: 1000,
            time_zone: None,
            utc_offset_minutes: None,
            draft_path: PathBuf::from("event-draft.json"),
        }
    }
}

impl WizardConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auto_save: env::var("WIZARD_AUTO_SAVE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.auto_save),
            auto_save_debounce_ms: env::var("WIZARD_AUTO_SAVE_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.auto_save_debounce_ms),
            time_zone: env::var("WIZARD_TIME_ZONE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .or(defaults.time_zone),
            utc_offset_minutes: env::var("WIZARD_UTC_OFFSET_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .or(defaults.utc_offset_minutes),
            draft_path: env::var("WIZARD_DRAFT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.draft_path),
        }
    }

    /// Check values that parse but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an out-of-range offset, an unknown zone
    /// name or an empty path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.draft_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDraftPath);
        }
        self.zone().map(|_| ())
    }

    /// Auto-save debounce as a duration
    #[must_use]
    pub const fn auto_save_debounce(&self) -> Duration {
        Duration::from_millis(self.auto_save_debounce_ms)
    }

    /// Calendar-day zone: the fixed offset if set, else the named zone,
    /// else the host's local time zone
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OffsetOutOfRange`] or
    /// [`ConfigError::UnknownTimeZone`] if the configured zone is unusable.
    pub fn zone(&self) -> Result<CalendarZone, ConfigError> {
        if let Some(minutes) = self.utc_offset_minutes {
            if minutes.unsigned_abs() > MAX_OFFSET_MINUTES.unsigned_abs() {
                return Err(ConfigError::OffsetOutOfRange(minutes));
            }
            return minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .map(CalendarZone::Fixed)
                .ok_or(ConfigError::OffsetOutOfRange(minutes));
        }

        match &self.time_zone {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map(CalendarZone::Named)
                .map_err(|_| ConfigError::UnknownTimeZone(name.clone())),
            None => Ok(CalendarZone::Local),
        }
    }

    /// Configuration for tests: UTC days, immediate auto-save.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            auto_save: true,
            auto_save_debounce_ms: 0,
            time_zone: Some("UTC".to_string()),
            utc_offset_minutes: None,
            draft_path: PathBuf::from("event-draft.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WizardConfig::default();
        assert!(config.auto_save);
        assert_eq!(config.auto_save_debounce(), Duration::from_secs(1));
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.zone(), Ok(CalendarZone::Local));
    }

    #[test]
    fn named_zone_keeps_daylight_saving_rules() {
        let config = WizardConfig {
            time_zone: Some("Europe/Berlin".to_string()),
            ..WizardConfig::for_tests()
        };
        assert_eq!(config.zone(), Ok(CalendarZone::Named(chrono_tz::Europe::Berlin)));
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let config = WizardConfig {
            time_zone: Some("Mars/Olympus".to_string()),
            ..WizardConfig::for_tests()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownTimeZone("Mars/Olympus".to_string()))
        );
    }

    #[test]
    fn fixed_offset_overrides_zone_name() {
        let mut config = WizardConfig {
            time_zone: Some("Europe/Berlin".to_string()),
            utc_offset_minutes: Some(-(23 * 60 + 59)),
            ..WizardConfig::for_tests()
        };
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.zone(),
            Ok(CalendarZone::Fixed(offset)) if offset.local_minus_utc() == -(23 * 3600 + 59 * 60)
        ));

        config.utc_offset_minutes = Some(24 * 60);
        assert_eq!(
            config.validate(),
            Err(ConfigError::OffsetOutOfRange(1440))
        );
    }

    #[test]
    fn empty_draft_path_is_rejected() {
        let mut config = WizardConfig::for_tests();
        config.draft_path = PathBuf::new();
        assert_eq!(config.validate(), Err(ConfigError::EmptyDraftPath));
    }
}
