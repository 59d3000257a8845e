//! Configuration settings for pomotui.
//!
//! Settings are loaded from `~/.pomotui/config.yaml` and then overridden by
//! command-line flags. The result is resolved once into [`Settings`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alert::AlertMode;
use crate::cli::args::Cli;
use crate::config::Paths;
use crate::core::{parse_duration, SessionDurations, SessionKind};
use crate::error::PomoError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Interval lengths.
    pub timer: TimerConfig,
    /// Alert settings.
    pub alert: AlertConfig,
    /// General settings.
    pub general: GeneralConfig,
}

/// Interval lengths in minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Work interval length in minutes.
    #[serde(default = "default_work")]
    pub work_minutes: u32,
    /// Short break length in minutes.
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
}

/// Alert settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AlertConfig {
    /// How interval ends are announced.
    pub mode: AlertMode,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Write logs to this file. Logging is off when unset.
    pub log_file: Option<PathBuf>,
}

// Default value functions for serde
const fn default_work() -> u32 {
    25
}

const fn default_short_break() -> u32 {
    5
}

const fn default_long_break() -> u32 {
    15
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
        }
    }
}

impl TimerConfig {
    /// Convert to validated durations.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::Config` if any length is zero.
    pub fn durations(&self) -> Result<SessionDurations, PomoError> {
        SessionDurations::from_minutes(
            u64::from(self.work_minutes),
            u64::from(self.short_break_minutes),
            u64::from(self.long_break_minutes),
        )
    }
}

/// Fully resolved runtime settings. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Interval lengths.
    pub durations: SessionDurations,
    /// Alert mode.
    pub alert: AlertMode,
    /// Log file, if logging is enabled.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, PomoError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, PomoError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomoError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), PomoError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PomoError::Config(format!("Failed to serialize config: {e}")))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PomoError::Config(format!(
                        "Failed to create directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        std::fs::write(path, contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Apply command-line overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if any duration is unparsable or not positive.
    pub fn resolve(&self, cli: &Cli) -> Result<Settings, PomoError> {
        let defaults = self.timer.durations()?;
        let pick = |flag: Option<&str>, name: &str, fallback| match flag {
            Some(raw) => parse_duration(raw).map_err(|e| match e {
                PomoError::Config(msg) | PomoError::Parse(msg) => {
                    PomoError::Config(format!("--{name}: {msg}"))
                }
                other => other,
            }),
            None => Ok(fallback),
        };

        let durations = SessionDurations::new(
            pick(cli.work.as_deref(), "work", defaults.for_kind(SessionKind::Work))?,
            pick(cli.short.as_deref(), "short", defaults.for_kind(SessionKind::ShortBreak))?,
            pick(cli.long.as_deref(), "long", defaults.for_kind(SessionKind::LongBreak))?,
        )?;

        Ok(Settings {
            durations,
            alert: cli.alert.unwrap_or(self.alert.mode),
            log_file: cli.log_file.clone().or_else(|| self.general.log_file.clone()),
        })
    }

    /// Build the file form of resolved settings.
    ///
    /// Lengths are stored in whole minutes, rounded up.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let minutes = |kind: SessionKind| {
            let secs = settings.durations.for_kind(kind).as_secs();
            u32::try_from(secs.div_ceil(60)).unwrap_or(u32::MAX)
        };

        Self {
            timer: TimerConfig {
                work_minutes: minutes(SessionKind::Work),
                short_break_minutes: minutes(SessionKind::ShortBreak),
                long_break_minutes: minutes(SessionKind::LongBreak),
            },
            alert: AlertConfig {
                mode: settings.alert,
            },
            general: GeneralConfig {
                log_file: settings.log_file.clone(),
            },
        }
    }
}
