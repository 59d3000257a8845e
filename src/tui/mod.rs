//! Terminal User Interface (TUI) for pomotui.
//!
//! Shows the current interval, its countdown and a rolling progress chart.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::Settings;
use crate::error::PomoError;
use crate::timer::{ChannelSink, Clock, CommandHandler, DisplayEvent, Flow, TimerCore};

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(settings: &Settings) -> Result<(), PomoError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomoError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(PomoError::Terminal(format!("Failed to setup terminal: {e}")));
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            disable_raw_mode().ok();
            execute!(io::stdout(), LeaveAlternateScreen).ok();
            return Err(PomoError::Terminal(format!("Failed to create terminal: {e}")));
        }
    };

    // Wire the timer to the screen and run main loop
    let (tx, events) = mpsc::channel();
    let mut handler = CommandHandler::new(
        Arc::new(TimerCore::new(settings.durations)),
        Clock::default(),
        settings.alert.alerter(),
        Arc::new(ChannelSink::new(tx)),
    );
    let mut app = App::new(handler.core().snapshot());
    handler.publish_current();

    let result = run_app(&mut terminal, &mut app, &mut handler, &events);
    drop(handler);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    handler: &mut CommandHandler,
    events: &Receiver<DisplayEvent>,
) -> Result<(), PomoError> {
    loop {
        app.apply_all(events.try_iter());

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomoError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle input
        if let Some(command) = event::next_command()? {
            tracing::debug!(?command, "key command");
            if handler.handle(command) == Flow::Quit {
                break;
            }
        }
    }

    Ok(())
}
