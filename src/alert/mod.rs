//! Interval-end alerts.
//!
//! Alerts are fire-and-forget: [`dispatch`] runs the alerter on its own
//! thread and only logs a failure. The timer never waits on an alert.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::error::PomoError;

/// Something that can tell the user an interval has ended.
#[cfg_attr(test, mockall::automock)]
pub trait Alerter: Send + Sync {
    /// Emit the alert. May block; callers go through [`dispatch`].
    ///
    /// # Errors
    ///
    /// Returns `PomoError::Alert` if the alert could not be produced.
    fn alert(&self) -> Result<(), PomoError>;
}

/// How interval ends are announced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlertMode {
    /// Play a short tone through the system audio player.
    #[default]
    Sound,
    /// Ring the terminal bell.
    Bell,
    /// No alert.
    None,
}

impl AlertMode {
    /// Build the alerter for this mode.
    #[must_use]
    pub fn alerter(self) -> Arc<dyn Alerter> {
        match self {
            Self::Sound => Arc::new(SoundAlerter),
            Self::Bell => Arc::new(BellAlerter),
            Self::None => Arc::new(SilentAlerter),
        }
    }
}

/// Plays a 440 Hz tone via `play` (SoX), or the console beep on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundAlerter;

impl SoundAlerter {
    fn command() -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd.exe");
            cmd.args(["/c", "echo \x07"]);
            cmd
        } else {
            let mut cmd = Command::new("play");
            cmd.args(["-nq", "synth", "0.5", "sin", "440"]);
            cmd
        }
    }
}

impl Alerter for SoundAlerter {
    fn alert(&self) -> Result<(), PomoError> {
        let status = Self::command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| PomoError::Alert(format!("failed to run sound player: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(PomoError::Alert(format!("sound player exited with {status}")))
        }
    }
}

/// Rings the terminal bell.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellAlerter;

impl Alerter for BellAlerter {
    fn alert(&self) -> Result<(), PomoError> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(b"\x07")
            .and_then(|()| stdout.flush())
            .map_err(|e| PomoError::Alert(format!("failed to ring bell: {e}")))
    }
}

/// Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlerter;

impl Alerter for SilentAlerter {
    fn alert(&self) -> Result<(), PomoError> {
        Ok(())
    }
}

/// Run `alerter` on a detached thread, logging and discarding any failure.
pub fn dispatch(alerter: &Arc<dyn Alerter>) {
    let alerter = Arc::clone(alerter);
    let spawned = thread::Builder::new()
        .name("pomotui-alert".to_string())
        .spawn(move || {
            if let Err(e) = alerter.alert() {
                tracing::warn!(error = %e, "alert failed");
            }
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "could not spawn alert thread");
    }
}
