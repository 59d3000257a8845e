//! Rolling completion series for the progress chart.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Maximum number of samples kept.
pub const PROGRESS_CAPACITY: usize = 20;

/// Fixed-size FIFO of completion percentages, oldest first.
///
/// Safe to share between the timer loop and readers: each append and each
/// read happens under one lock, so a reader never sees a partial append.
#[derive(Debug, Default)]
pub struct ProgressFeed {
    samples: Mutex<VecDeque<f64>>,
}

impl ProgressFeed {
    /// Create an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: Mutex::new(VecDeque::with_capacity(PROGRESS_CAPACITY)),
        }
    }

    /// Record a sample given the fraction of the interval still remaining.
    ///
    /// The stored value is the percent complete, `(1 - fraction) * 100`.
    pub fn record_completion(&self, fraction_remaining: f64) {
        let percent = (1.0 - fraction_remaining.clamp(0.0, 1.0)) * 100.0;
        let mut samples = self.lock();
        if samples.len() >= PROGRESS_CAPACITY {
            samples.pop_front();
        }
        samples.push_back(percent);
    }

    /// Current samples, oldest first.
    #[must_use]
    pub fn samples(&self) -> Vec<f64> {
        self.lock().iter().copied().collect()
    }

    /// Drop all samples.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<f64>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_records_percent_complete() {
        let feed = ProgressFeed::new();
        feed.record_completion(1.0);
        feed.record_completion(0.75);
        feed.record_completion(0.0);

        assert_eq!(feed.samples(), vec![0.0, 25.0, 100.0]);
    }

    #[test]
    fn test_clamps_out_of_range_fraction() {
        let feed = ProgressFeed::new();
        feed.record_completion(1.5);
        feed.record_completion(-0.5);

        assert_eq!(feed.samples(), vec![0.0, 100.0]);
    }

    #[test]
    fn test_keeps_last_twenty_in_order() {
        let feed = ProgressFeed::new();
        let fractions: Vec<f64> = (0..25).map(|i| 1.0 - f64::from(i) / 100.0).collect();
        for f in &fractions {
            feed.record_completion(*f);
        }

        let samples = feed.samples();
        assert_eq!(samples.len(), PROGRESS_CAPACITY);
        let expected: Vec<f64> = (5..25).map(f64::from).collect();
        for (got, want) in samples.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_reset_clears() {
        let feed = ProgressFeed::new();
        feed.record_completion(0.5);
        assert_eq!(feed.samples(), vec![50.0]);

        feed.reset();
        assert!(feed.samples().is_empty());
        feed.reset();
        assert!(feed.samples().is_empty());
    }

    #[test]
    fn test_concurrent_reads_see_whole_samples() {
        let feed = Arc::new(ProgressFeed::new());
        let writer = {
            let feed = Arc::clone(&feed);
            thread::spawn(move || {
                for i in 0..1_000 {
                    feed.record_completion(f64::from(i % 100) / 100.0);
                }
            })
        };

        for _ in 0..1_000 {
            let samples = feed.samples();
            assert!(samples.len() <= PROGRESS_CAPACITY);
            assert!(samples.iter().all(|s| (0.0..=100.0).contains(s)));
        }

        writer.join().unwrap();
        assert_eq!(feed.samples().len(), PROGRESS_CAPACITY);
    }
}
