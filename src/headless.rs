//! Line-oriented front end.
//!
//! Reads one command per line from an input stream and prints each snapshot
//! as a line, either human-readable or JSON. Useful for scripting and for
//! terminals where the full-screen UI is unavailable.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::alert::Alerter;
use crate::cli::OutputFormat;
use crate::core::SessionDurations;
use crate::error::PomoError;
use crate::timer::{
    ChannelSink, Clock, Command, CommandHandler, DisplayEvent, Flow, Snapshot, TimerCore,
};

const POLL: Duration = Duration::from_millis(50);

/// Render a snapshot as one output line.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_line(snapshot: &Snapshot, format: OutputFormat) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} {} {}% Complete",
            snapshot.session_label, snapshot.remaining_formatted, snapshot.percent_complete
        )),
        OutputFormat::Json => serde_json::to_string(snapshot)
            .map_err(|e| PomoError::Parse(format!("Failed to serialize snapshot: {e}"))),
    }
}

fn parse_command(line: &str) -> Option<Command> {
    let mut chars = line.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => Command::from_key(key),
        _ => None,
    }
}

fn spawn_reader<R>(input: R) -> Result<Receiver<Command>, PomoError>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("pomotui-input".to_string())
        .spawn(move || {
            for line in input.lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Some(command) => {
                        if tx.send(command).is_err() {
                            return;
                        }
                    }
                    None => tracing::debug!(input = %line, "ignored input"),
                }
            }
            // End of input quits.
            tx.send(Command::Quit).ok();
        })?;
    Ok(rx)
}

fn write_event<W: Write>(
    out: &mut W,
    event: DisplayEvent,
    format: OutputFormat,
) -> Result<(), PomoError> {
    if let DisplayEvent::Snapshot(snapshot) = event {
        writeln!(out, "{}", format_line(&snapshot, format)?)?;
        out.flush()?;
    }
    Ok(())
}

/// Run the headless front end until a quit command or end of input.
///
/// # Errors
///
/// Returns an error if the input thread cannot be started or output fails.
pub fn run<R, W>(
    durations: SessionDurations,
    clock: Clock,
    alerter: Arc<dyn Alerter>,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), PomoError>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let (tx, display) = mpsc::channel();
    let mut handler = CommandHandler::new(
        Arc::new(TimerCore::new(durations)),
        clock,
        alerter,
        Arc::new(ChannelSink::new(tx)),
    );
    handler.publish_current();
    let commands = spawn_reader(input)?;

    loop {
        match display.recv_timeout(POLL) {
            Ok(event) => write_event(out, event, format)?,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let command = match commands.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) => continue,
            Err(TryRecvError::Disconnected) => Command::Quit,
        };
        if handler.handle(command) == Flow::Quit {
            break;
        }
    }

    drop(handler);
    for event in display.try_iter() {
        write_event(out, event, format)?;
    }
    Ok(())
}
