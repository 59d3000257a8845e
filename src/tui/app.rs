//! Application state for the TUI.

use crate::core::PROGRESS_CAPACITY;
use crate::timer::{DisplayEvent, Snapshot};

/// Application state, rebuilt from display events.
pub struct App {
    /// Latest session snapshot.
    pub snapshot: Snapshot,
    /// Latest progress series, oldest first.
    pub samples: Vec<f64>,
}

impl App {
    /// Create a new app showing `snapshot` and an empty chart.
    #[must_use]
    pub const fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            samples: Vec::new(),
        }
    }

    /// Apply one update from the timer.
    pub fn apply(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::Snapshot(snapshot) => self.snapshot = snapshot,
            DisplayEvent::Progress(samples) => self.samples = samples,
        }
    }

    /// Apply every pending update.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = DisplayEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Chart points as (sample index, percent complete).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &value)| (i as f64, value))
            .collect()
    }

    /// Right edge of the chart's x axis.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn x_max() -> f64 {
        (PROGRESS_CAPACITY - 1) as f64
    }

    /// Short description of the timer state for the status bar.
    #[must_use]
    pub const fn state_label(&self) -> &'static str {
        if self.snapshot.running {
            "Running"
        } else {
            "Paused"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionDurations;
    use crate::timer::TimerCore;

    fn app() -> App {
        App::new(TimerCore::new(SessionDurations::default()).snapshot())
    }

    #[test]
    fn test_new_app() {
        let app = app();
        assert_eq!(app.snapshot.remaining_formatted, "25:00");
        assert!(app.samples.is_empty());
        assert_eq!(app.state_label(), "Paused");
    }

    #[test]
    fn test_apply_events() {
        let mut app = app();
        let mut running = app.snapshot.clone();
        running.running = true;
        running.remaining_formatted = "24:59".to_string();

        app.apply_all([
            DisplayEvent::Snapshot(running),
            DisplayEvent::Progress(vec![0.0, 0.5]),
        ]);

        assert_eq!(app.snapshot.remaining_formatted, "24:59");
        assert_eq!(app.state_label(), "Running");
        assert_eq!(app.chart_points(), vec![(0.0, 0.0), (1.0, 0.5)]);
    }

    #[test]
    fn test_empty_progress_clears_chart() {
        let mut app = app();
        app.apply(DisplayEvent::Progress(vec![10.0]));
        app.apply(DisplayEvent::Progress(Vec::new()));
        assert!(app.chart_points().is_empty());
    }

    #[test]
    fn test_x_axis_spans_capacity() {
        assert!((App::x_max() - 19.0).abs() < f64::EPSILON);
    }
}
