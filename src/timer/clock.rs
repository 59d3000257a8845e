//! Tick source for the timer loop.
//!
//! The clock yields one tick per interval (one second in normal use). Waiting
//! happens on a condition variable so that a pause, reset, or quit wakes the
//! waiter immediately instead of after the rest of the interval.

use std::sync::{Condvar, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Logical time that passes per tick.
pub const TICK: Duration = Duration::from_secs(1);

/// Outcome of waiting for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickWait {
    /// The interval elapsed.
    Ticked,
    /// The waiter was told to stop before the interval elapsed.
    Cancelled,
}

/// Tick cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    interval: Duration,
}

impl Clock {
    /// A clock ticking every `interval` of wall time.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Wall time between ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a ticker whose first tick is one interval from now.
    #[must_use]
    pub fn start(&self) -> Ticker {
        Ticker {
            interval: self.interval,
            next: Instant::now() + self.interval,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(TICK)
    }
}

/// A running tick schedule.
///
/// Deadlines advance by a fixed interval so time spent handling a tick does
/// not push later ticks back.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    /// Wait for the next tick while holding `guard`'s mutex released.
    ///
    /// `keep_waiting` is checked whenever `signal` is notified; once it returns
    /// false the wait ends with [`TickWait::Cancelled`]. The guard is handed
    /// back locked in both cases.
    pub fn wait<'a, T, F>(
        &mut self,
        signal: &Condvar,
        mut guard: MutexGuard<'a, T>,
        mut keep_waiting: F,
    ) -> (MutexGuard<'a, T>, TickWait)
    where
        F: FnMut(&mut T) -> bool,
    {
        loop {
            if !keep_waiting(&mut *guard) {
                return (guard, TickWait::Cancelled);
            }

            let now = Instant::now();
            if now >= self.next {
                self.schedule_after(now);
                return (guard, TickWait::Ticked);
            }

            let (g, _) = signal
                .wait_timeout(guard, self.next - now)
                .unwrap_or_else(PoisonError::into_inner);
            guard = g;
        }
    }

    fn schedule_after(&mut self, now: Instant) {
        self.next += self.interval;
        // Fell more than a full interval behind (suspended process); skip ahead
        // rather than firing a burst of catch-up ticks.
        if self.next <= now {
            self.next = now + self.interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use super::*;

    #[test]
    fn test_default_is_one_second() {
        assert_eq!(Clock::default().interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_ticks_after_interval() {
        let lock = Mutex::new(());
        let signal = Condvar::new();
        let mut ticker = Clock::new(Duration::from_millis(20)).start();

        let started = Instant::now();
        let guard = lock.lock().unwrap();
        let (_guard, outcome) = ticker.wait(&signal, guard, |_| true);

        assert_eq!(outcome, TickWait::Ticked);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_wait_cancelled_when_condition_clears() {
        let pair = Arc::new((Mutex::new(true), Condvar::new()));
        let mut ticker = Clock::new(Duration::from_secs(30)).start();

        let stopper = {
            let pair = Arc::clone(&pair);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                let (lock, signal) = &*pair;
                *lock.lock().unwrap() = false;
                signal.notify_all();
            })
        };

        let (lock, signal) = &*pair;
        let started = Instant::now();
        let guard = lock.lock().unwrap();
        let (_guard, outcome) = ticker.wait(signal, guard, |keep| *keep);

        assert_eq!(outcome, TickWait::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(5));
        stopper.join().unwrap();
    }

    #[test]
    fn test_wait_cancelled_immediately() {
        let lock = Mutex::new(false);
        let signal = Condvar::new();
        let mut ticker = Clock::new(Duration::from_secs(30)).start();

        let guard = lock.lock().unwrap();
        let (_guard, outcome) = ticker.wait(&signal, guard, |keep| *keep);
        assert_eq!(outcome, TickWait::Cancelled);
    }
}
