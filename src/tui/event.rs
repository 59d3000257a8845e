//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomoError;
use crate::timer::Command;

/// How long to wait for input before redrawing.
pub const POLL: Duration = Duration::from_millis(100);

/// Map a key press to a timer command.
#[must_use]
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Command::Quit);
    }

    match key.code {
        KeyCode::Char(c) => Command::from_key(c),
        KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Wait up to [`POLL`] for a key and translate it.
///
/// Returns None on timeout or for keys that are not commands.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_command() -> Result<Option<Command>, PomoError> {
    if event::poll(POLL).map_err(|e| PomoError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| PomoError::Terminal(format!("Event read failed: {e}")))?
        {
            let command = command_for_key(key);
            if command.is_none() {
                tracing::trace!(code = ?key.code, "ignored key");
            }
            return Ok(command);
        }
    }

    Ok(None)
}
