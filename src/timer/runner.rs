//! The background countdown loop.
//!
//! [`TimerCore`] is the state shared between the loop and the command
//! handler. [`TimerLoop`] is one run of the countdown: it ticks the session
//! once per clock tick, feeds the progress series, publishes snapshots, and
//! rolls over into the next interval on expiry until it is stopped.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crate::alert::{self, Alerter};
use crate::core::{ProgressFeed, SessionController, SessionDurations, SessionState};
use crate::timer::clock::{Clock, TickWait, TICK};
use crate::timer::snapshot::{DisplaySink, Snapshot};

/// State guarded by the core's mutex.
#[derive(Debug)]
pub(crate) struct Guarded {
    /// The session state machine.
    pub(crate) controller: SessionController,
    /// Bumped every time a loop is started or stopped. A loop only keeps
    /// going while its own generation is current.
    generation: u64,
}

impl Guarded {
    fn owns(&self, generation: u64) -> bool {
        self.controller.state().running && self.generation == generation
    }
}

/// Shared session state, progress series, and the wake-up signal for the loop.
#[derive(Debug)]
pub struct TimerCore {
    guarded: Mutex<Guarded>,
    signal: Condvar,
    feed: ProgressFeed,
}

impl TimerCore {
    /// Create the core for a fresh session.
    #[must_use]
    pub fn new(durations: SessionDurations) -> Self {
        Self {
            guarded: Mutex::new(Guarded {
                controller: SessionController::new(durations),
                generation: 0,
            }),
            signal: Condvar::new(),
            feed: ProgressFeed::new(),
        }
    }

    /// Lock the session state.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Guarded> {
        self.guarded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.lock().controller)
    }

    /// Copy of the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.lock().controller.state()
    }

    /// Current progress series, oldest first.
    #[must_use]
    pub fn samples(&self) -> Vec<f64> {
        self.feed.samples()
    }

    /// Mark the session running and claim a new loop generation.
    ///
    /// Returns `None` if the session is already running.
    pub(crate) fn begin_run(&self) -> Option<u64> {
        let mut guarded = self.lock();
        if guarded.controller.state().running {
            return None;
        }
        guarded.controller.set_running(true);
        guarded.generation += 1;
        Some(guarded.generation)
    }

    /// Stop any running loop, then apply `f` to the state under the same lock.
    ///
    /// The loop is woken and exits without touching state again.
    pub(crate) fn stop_with<R>(&self, f: impl FnOnce(&mut Guarded, &ProgressFeed) -> R) -> R {
        let mut guarded = self.lock();
        guarded.controller.set_running(false);
        guarded.generation += 1;
        let result = f(&mut guarded, &self.feed);
        drop(guarded);
        self.signal.notify_all();
        result
    }
}

/// One run of the countdown.
pub struct TimerLoop {
    core: Arc<TimerCore>,
    clock: Clock,
    alerter: Arc<dyn Alerter>,
    sink: Arc<dyn DisplaySink>,
    generation: u64,
}

impl TimerLoop {
    /// Prepare a loop for the generation returned by [`TimerCore::begin_run`].
    #[must_use]
    pub fn new(
        core: Arc<TimerCore>,
        clock: Clock,
        alerter: Arc<dyn Alerter>,
        sink: Arc<dyn DisplaySink>,
        generation: u64,
    ) -> Self {
        Self {
            core,
            clock,
            alerter,
            sink,
            generation,
        }
    }

    /// Count down until paused, reset, or superseded.
    ///
    /// Every state change happens under the core lock after confirming this
    /// loop still owns the session, so once a stop has taken the lock no
    /// further tick is applied.
    pub fn run(self) {
        let generation = self.generation;
        let mut ticker = self.clock.start();
        tracing::debug!(generation, interval = ?self.clock.interval(), "timer loop started");

        loop {
            let (mut guarded, outcome) =
                ticker.wait(&self.core.signal, self.core.lock(), |state| state.owns(generation));
            if outcome == TickWait::Cancelled || !guarded.owns(generation) {
                break;
            }

            guarded.controller.tick(TICK);
            let fraction = guarded.controller.fraction_remaining();
            self.core.feed.record_completion(fraction);
            let current = Snapshot::capture(&guarded.controller);
            self.sink.publish_snapshot(&current);
            self.sink.publish_progress(&self.core.feed.samples());

            let finished = guarded.controller.is_expired().then(|| {
                let finished = guarded.controller.state().kind;
                guarded.controller.advance();
                self.core.feed.reset();

                let next = Snapshot::capture(&guarded.controller);
                self.sink.publish_snapshot(&next);
                self.sink.publish_progress(&[]);
                (finished, next)
            });

            // Logging and alerts only once the state is unlocked.
            drop(guarded);
            tracing::trace!(
                remaining = %current.remaining_formatted,
                percent = current.percent_complete,
                "tick"
            );
            if let Some((finished, next)) = finished {
                tracing::info!(
                    finished = finished.label(),
                    next = next.session_label,
                    completed = next.completed_work_sessions,
                    "interval finished"
                );
                alert::dispatch(&self.alerter);
            }
        }

        tracing::debug!(generation, "timer loop stopped");
    }
}
