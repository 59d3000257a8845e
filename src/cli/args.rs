use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::alert::AlertMode;

#[derive(Parser, Debug)]
#[command(name = "pomotui")]
#[command(about = "A Pomodoro timer for the terminal")]
#[command(long_about = "pomotui - A Pomodoro timer for the terminal

Alternates focused work intervals with short breaks, and a long break after
every fourth work interval. Shows a live countdown and a rolling progress chart.

KEYS:
  s    Start the countdown
  p    Pause
  r    Reset to a fresh work interval
  q    Quit

DURATIONS:
  A plain number is minutes. Units are also accepted: 90s, 25m, 1h30m.

CONFIGURATION:
  Defaults are read from ~/.pomotui/config.yaml when present.
  Command-line flags take precedence.")]
#[command(version)]
pub struct Cli {
    /// Work interval length (default 25 minutes)
    #[arg(short, long, value_name = "DURATION", allow_hyphen_values = true)]
    pub work: Option<String>,

    /// Short break length (default 5 minutes)
    #[arg(short, long, value_name = "DURATION", allow_hyphen_values = true)]
    pub short: Option<String>,

    /// Long break length (default 15 minutes)
    #[arg(short, long, value_name = "DURATION", allow_hyphen_values = true)]
    pub long: Option<String>,

    /// How interval ends are announced
    #[arg(short, long, value_enum)]
    pub alert: Option<AlertMode>,

    /// Config file to read instead of ~/.pomotui/config.yaml
    #[arg(short, long, value_name = "PATH", env = "POMOTUI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write a log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Run without the full-screen UI, reading commands from stdin
    ///
    /// Each input line is a command: s (start), p (pause), r (reset),
    /// q (quit). End of input quits. Every update is printed as a line.
    #[arg(long)]
    pub headless: bool,

    /// Output format for headless mode
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: OutputFormat,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

/// Output format for headless mode.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["pomotui"]);
        assert!(cli.work.is_none());
        assert!(cli.alert.is_none());
        assert!(!cli.headless);
        assert_eq!(cli.output, OutputFormat::Pretty);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "pomotui", "-w", "50", "-s", "10m", "-l", "-1", "--alert", "bell", "--headless",
            "-o", "json",
        ]);
        assert_eq!(cli.work.as_deref(), Some("50"));
        assert_eq!(cli.short.as_deref(), Some("10m"));
        assert_eq!(cli.long.as_deref(), Some("-1"));
        assert_eq!(cli.alert, Some(AlertMode::Bell));
        assert!(cli.headless);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_alert_mode_rejected() {
        assert!(Cli::try_parse_from(["pomotui", "--alert", "siren"]).is_err());
    }
}
