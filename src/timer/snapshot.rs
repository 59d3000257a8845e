//! Display snapshots and the sinks that receive them.

use std::sync::mpsc::Sender;

use serde::Serialize;

use crate::core::{format_mmss, SessionController, SessionKind};

/// What a renderer needs to show at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Current interval kind.
    #[serde(skip)]
    pub kind: SessionKind,
    /// "Work", "Short Break" or "Long Break".
    pub session_label: &'static str,
    /// Remaining time as zero-padded MM:SS.
    pub remaining_formatted: String,
    /// Whole percent of the interval elapsed, 0 to 100.
    pub percent_complete: u8,
    /// Work intervals finished so far.
    pub completed_work_sessions: u32,
    /// Whether the countdown is running.
    pub running: bool,
}

impl Snapshot {
    /// Capture the controller's current state.
    #[must_use]
    pub fn capture(controller: &SessionController) -> Self {
        let state = controller.state();
        Self {
            kind: state.kind,
            session_label: state.kind.label(),
            remaining_formatted: format_mmss(state.remaining),
            percent_complete: percent_complete(controller.fraction_remaining()),
            completed_work_sessions: state.completed_work_sessions,
            running: state.running,
        }
    }
}

/// Convert a remaining fraction into a whole percent complete.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent_complete(fraction_remaining: f64) -> u8 {
    ((1.0 - fraction_remaining.clamp(0.0, 1.0)) * 100.0).round() as u8
}

/// An update pushed from the core to renderers.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    /// New session snapshot.
    Snapshot(Snapshot),
    /// New progress series, oldest first.
    Progress(Vec<f64>),
}

/// Receives display updates.
///
/// Called from the timer thread while session state is locked, so
/// implementations must return promptly and never call back into the timer.
pub trait DisplaySink: Send + Sync {
    /// Publish a session snapshot.
    fn publish_snapshot(&self, snapshot: &Snapshot);

    /// Publish the progress series.
    fn publish_progress(&self, samples: &[f64]);
}

/// Forwards updates over an mpsc channel to the foreground thread.
///
/// A closed channel means the renderer has gone away; updates are dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<DisplayEvent>,
}

impl ChannelSink {
    /// Create a sink sending on `tx`.
    #[must_use]
    pub const fn new(tx: Sender<DisplayEvent>) -> Self {
        Self { tx }
    }
}

impl DisplaySink for ChannelSink {
    fn publish_snapshot(&self, snapshot: &Snapshot) {
        self.tx.send(DisplayEvent::Snapshot(snapshot.clone())).ok();
    }

    fn publish_progress(&self, samples: &[f64]) {
        self.tx.send(DisplayEvent::Progress(samples.to_vec())).ok();
    }
}
