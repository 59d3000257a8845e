//! Session state machine.
//!
//! A session cycles through work intervals and breaks:
//! Work -> Short Break -> Work -> ... and every fourth completed work
//! interval is followed by a Long Break instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PomoError;

/// Number of completed work intervals between long breaks.
pub const WORK_SESSIONS_PER_LONG_BREAK: u32 = 4;

/// Kind of interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Focused work
    Work,
    /// Short break between work intervals
    ShortBreak,
    /// Long break after every fourth work interval
    LongBreak,
}

impl SessionKind {
    /// Get display name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Configured interval lengths, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDurations {
    work: Duration,
    short_break: Duration,
    long_break: Duration,
}

impl SessionDurations {
    /// Create durations, rejecting zero-length intervals.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::Config` if any duration is zero.
    pub fn new(
        work: Duration,
        short_break: Duration,
        long_break: Duration,
    ) -> Result<Self, PomoError> {
        for (name, d) in [
            ("work", work),
            ("short break", short_break),
            ("long break", long_break),
        ] {
            if d.is_zero() {
                return Err(PomoError::Config(format!(
                    "{name} duration must be positive"
                )));
            }
        }

        Ok(Self {
            work,
            short_break,
            long_break,
        })
    }

    /// Create durations from whole minutes.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::Config` if any value is zero.
    pub fn from_minutes(work: u64, short_break: u64, long_break: u64) -> Result<Self, PomoError> {
        Self::new(
            Duration::from_secs(work.saturating_mul(60)),
            Duration::from_secs(short_break.saturating_mul(60)),
            Duration::from_secs(long_break.saturating_mul(60)),
        )
    }

    /// Duration of the given interval kind.
    #[must_use]
    pub const fn for_kind(&self, kind: SessionKind) -> Duration {
        match kind {
            SessionKind::Work => self.work,
            SessionKind::ShortBreak => self.short_break,
            SessionKind::LongBreak => self.long_break,
        }
    }
}

impl Default for SessionDurations {
    fn default() -> Self {
        Self {
            work: Duration::from_secs(25 * 60),
            short_break: Duration::from_secs(5 * 60),
            long_break: Duration::from_secs(15 * 60),
        }
    }
}

/// Mutable progress of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Current interval.
    pub kind: SessionKind,
    /// Time left in the current interval.
    pub remaining: Duration,
    /// Number of work intervals finished.
    pub completed_work_sessions: u32,
    /// Whether the timer should keep counting down.
    pub running: bool,
}

/// Owns the session state and its transitions.
#[derive(Debug, Clone)]
pub struct SessionController {
    durations: SessionDurations,
    state: SessionState,
}

impl SessionController {
    /// Create a controller at the start of a work interval, not running.
    #[must_use]
    pub const fn new(durations: SessionDurations) -> Self {
        Self {
            state: SessionState {
                kind: SessionKind::Work,
                remaining: durations.for_kind(SessionKind::Work),
                completed_work_sessions: 0,
                running: false,
            },
            durations,
        }
    }

    /// Configured length of an interval kind.
    #[must_use]
    pub const fn configured_duration(&self, kind: SessionKind) -> Duration {
        self.durations.for_kind(kind)
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Set the running flag.
    pub(crate) fn set_running(&mut self, running: bool) {
        self.state.running = running;
    }

    /// Count down by `delta`, stopping at zero. Does nothing when not running.
    pub fn tick(&mut self, delta: Duration) {
        if !self.state.running {
            return;
        }
        self.state.remaining = self.state.remaining.saturating_sub(delta);
    }

    /// Whether the current interval has run out.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.state.remaining.is_zero()
    }

    /// Fraction of the current interval still remaining, in `[0, 1]`.
    #[must_use]
    pub fn fraction_remaining(&self) -> f64 {
        let total = self.configured_duration(self.state.kind);
        if total.is_zero() {
            return 0.0;
        }
        (self.state.remaining.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Move to the next interval once the current one has expired.
    ///
    /// Work is followed by a short break, or a long break after every fourth
    /// completed work interval. Any break is followed by work. Does nothing if
    /// the interval has not expired.
    pub fn advance(&mut self) {
        if !self.is_expired() {
            return;
        }

        self.state.kind = match self.state.kind {
            SessionKind::Work => {
                self.state.completed_work_sessions += 1;
                if self.state.completed_work_sessions % WORK_SESSIONS_PER_LONG_BREAK == 0 {
                    SessionKind::LongBreak
                } else {
                    SessionKind::ShortBreak
                }
            }
            SessionKind::ShortBreak | SessionKind::LongBreak => SessionKind::Work,
        };
        self.state.remaining = self.configured_duration(self.state.kind);
    }

    /// Return to the start of a work interval.
    ///
    /// The completed count and the running flag are left to the caller.
    pub fn reset(&mut self) {
        self.state.kind = SessionKind::Work;
        self.state.remaining = self.configured_duration(SessionKind::Work);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn controller() -> SessionController {
        let durations = SessionDurations::new(secs(100), secs(20), secs(60)).unwrap();
        SessionController::new(durations)
    }

    fn expire(c: &mut SessionController) {
        let remaining = c.state().remaining;
        c.tick(remaining);
        assert!(c.is_expired());
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        let state = c.state();
        assert_eq!(state.kind, SessionKind::Work);
        assert_eq!(state.remaining, secs(100));
        assert_eq!(state.completed_work_sessions, 0);
        assert!(!state.running);
    }

    #[test]
    fn test_default_durations() {
        let d = SessionDurations::default();
        assert_eq!(d.for_kind(SessionKind::Work), secs(25 * 60));
        assert_eq!(d.for_kind(SessionKind::ShortBreak), secs(5 * 60));
        assert_eq!(d.for_kind(SessionKind::LongBreak), secs(15 * 60));
        assert_eq!(SessionDurations::from_minutes(25, 5, 15).unwrap(), d);
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert!(SessionDurations::new(secs(0), secs(1), secs(1)).is_err());
        assert!(SessionDurations::from_minutes(25, 0, 15).is_err());
        assert!(SessionDurations::from_minutes(25, 5, 0).is_err());
    }

    #[test]
    fn test_tick_counts_down() {
        for d in [1, 2, 3, 59, 61, 1500] {
            let durations = SessionDurations::new(secs(d), secs(1), secs(1)).unwrap();
            let mut c = SessionController::new(durations);
            c.set_running(true);

            for n in 0..d {
                assert_eq!(c.state().remaining, secs(d - n), "duration {d}, tick {n}");
                assert!(!c.is_expired());
                c.tick(secs(1));
            }
            assert!(c.is_expired(), "duration {d} should expire after {d} ticks");
        }
    }

    #[test]
    fn test_tick_noop_when_not_running() {
        let mut c = controller();
        c.tick(secs(10));
        assert_eq!(c.state().remaining, secs(100));
    }

    #[test]
    fn test_tick_clamps_at_zero() {
        let mut c = controller();
        c.set_running(true);
        c.tick(secs(1_000));
        assert_eq!(c.state().remaining, Duration::ZERO);
        assert!(c.is_expired());

        c.tick(secs(1));
        assert_eq!(c.state().remaining, Duration::ZERO);
    }

    #[test]
    fn test_advance_from_work_to_short_break() {
        let mut c = controller();
        c.set_running(true);
        expire(&mut c);
        c.advance();

        assert_eq!(c.state().kind, SessionKind::ShortBreak);
        assert_eq!(c.state().remaining, secs(20));
        assert_eq!(c.state().completed_work_sessions, 1);
    }

    #[test]
    fn test_advance_from_break_to_work() {
        let mut c = controller();
        c.set_running(true);
        expire(&mut c);
        c.advance();
        expire(&mut c);
        c.advance();

        assert_eq!(c.state().kind, SessionKind::Work);
        assert_eq!(c.state().remaining, secs(100));
        assert_eq!(c.state().completed_work_sessions, 1);
    }

    #[test]
    fn test_advance_before_expiry_is_ignored() {
        let mut c = controller();
        c.set_running(true);
        c.tick(secs(5));
        c.advance();

        assert_eq!(c.state().kind, SessionKind::Work);
        assert_eq!(c.state().remaining, secs(95));
        assert_eq!(c.state().completed_work_sessions, 0);
    }

    #[test]
    fn test_every_fourth_work_session_gets_long_break() {
        let mut c = controller();
        c.set_running(true);
        let mut breaks = Vec::new();

        for _ in 0..4 {
            expire(&mut c);
            c.advance();
            breaks.push(c.state().kind);
            expire(&mut c);
            c.advance();
            assert_eq!(c.state().kind, SessionKind::Work);
        }

        assert_eq!(c.state().completed_work_sessions, 4);
        assert_eq!(
            breaks,
            vec![
                SessionKind::ShortBreak,
                SessionKind::ShortBreak,
                SessionKind::ShortBreak,
                SessionKind::LongBreak,
            ]
        );
    }

    #[test]
    fn test_long_break_uses_long_duration() {
        let mut c = controller();
        c.set_running(true);
        for _ in 0..3 {
            expire(&mut c);
            c.advance();
            expire(&mut c);
            c.advance();
        }
        expire(&mut c);
        c.advance();

        assert_eq!(c.state().kind, SessionKind::LongBreak);
        assert_eq!(c.state().remaining, secs(60));
    }

    #[test]
    fn test_fraction_remaining() {
        let mut c = controller();
        assert!((c.fraction_remaining() - 1.0).abs() < f64::EPSILON);

        c.set_running(true);
        c.tick(secs(25));
        assert!((c.fraction_remaining() - 0.75).abs() < 1e-9);

        c.tick(secs(75));
        assert!(c.fraction_remaining().abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_returns_to_work() {
        let mut c = controller();
        c.set_running(true);
        expire(&mut c);
        c.advance();
        c.tick(secs(3));

        c.reset();
        assert_eq!(c.state().kind, SessionKind::Work);
        assert_eq!(c.state().remaining, secs(100));
        assert_eq!(c.state().completed_work_sessions, 1);

        let once = *c.state();
        c.reset();
        assert_eq!(*c.state(), once);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(SessionKind::Work.label(), "Work");
        assert_eq!(SessionKind::ShortBreak.to_string(), "Short Break");
        assert_eq!(SessionKind::LongBreak.to_string(), "Long Break");
    }
}
