//! User commands and their effect on the timer.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::alert::Alerter;
use crate::timer::clock::Clock;
use crate::timer::runner::{TimerCore, TimerLoop};
use crate::timer::snapshot::{DisplaySink, Snapshot};

/// A user intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start or resume the countdown.
    Start,
    /// Pause the countdown.
    Pause,
    /// Stop and return to the start of a work interval.
    Reset,
    /// Exit the program.
    Quit,
}

impl Command {
    /// Map a key to a command. Keys are case-sensitive; anything else is ignored.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            's' => Some(Self::Start),
            'p' => Some(Self::Pause),
            'r' => Some(Self::Reset),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Whether the foreground should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Shut down.
    Quit,
}

/// Applies commands to the shared timer state and owns the loop thread.
pub struct CommandHandler {
    core: Arc<TimerCore>,
    clock: Clock,
    alerter: Arc<dyn Alerter>,
    sink: Arc<dyn DisplaySink>,
    worker: Option<JoinHandle<()>>,
}

impl CommandHandler {
    /// Create a handler. No loop runs until [`Command::Start`].
    #[must_use]
    pub fn new(
        core: Arc<TimerCore>,
        clock: Clock,
        alerter: Arc<dyn Alerter>,
        sink: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            core,
            clock,
            alerter,
            sink,
            worker: None,
        }
    }

    /// The shared timer state.
    #[must_use]
    pub const fn core(&self) -> &Arc<TimerCore> {
        &self.core
    }

    /// Publish the current snapshot and progress series.
    pub fn publish_current(&self) {
        let guarded = self.core.lock();
        self.sink
            .publish_snapshot(&Snapshot::capture(&guarded.controller));
        self.sink.publish_progress(&self.core.samples());
    }

    /// Apply a command.
    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Reset => self.reset(),
            Command::Quit => {
                self.quit();
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Start the countdown unless it is already running.
    pub fn start(&mut self) {
        let Some(generation) = self.core.begin_run() else {
            tracing::debug!("start ignored, already running");
            return;
        };

        // Any earlier loop was stopped before `begin_run` could succeed.
        self.join_worker();

        let timer = TimerLoop::new(
            Arc::clone(&self.core),
            self.clock,
            Arc::clone(&self.alerter),
            Arc::clone(&self.sink),
            generation,
        );
        match thread::Builder::new()
            .name("pomotui-timer".to_string())
            .spawn(move || timer.run())
        {
            Ok(handle) => {
                self.worker = Some(handle);
                tracing::info!(generation, "timer started");
            }
            Err(e) => {
                tracing::error!(error = %e, "could not spawn timer thread");
                self.core.stop_with(|_, _| ());
            }
        }
    }

    /// Stop the countdown where it is.
    pub fn pause(&mut self) {
        let sink = &self.sink;
        self.core.stop_with(|guarded, _| {
            sink.publish_snapshot(&Snapshot::capture(&guarded.controller));
        });
        self.join_worker();
        tracing::info!("timer paused");
    }

    /// Stop and return to a fresh work interval with an empty chart.
    pub fn reset(&mut self) {
        let sink = &self.sink;
        self.core.stop_with(|guarded, feed| {
            guarded.controller.reset();
            feed.reset();
            sink.publish_snapshot(&Snapshot::capture(&guarded.controller));
            sink.publish_progress(&[]);
        });
        self.join_worker();
        tracing::info!("timer reset");
    }

    /// Stop the countdown and wait for the loop thread to finish.
    pub fn quit(&mut self) {
        self.core.stop_with(|_, _| ());
        self.join_worker();
        tracing::info!("timer shut down");
    }

    fn join_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::error!("timer thread panicked");
            }
        }
    }
}

impl Drop for CommandHandler {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.quit();
        }
    }
}
