//! Session state machine, progress series, and duration helpers.
//!
//! Nothing in here touches the terminal or spawns threads.

pub mod format;
pub mod progress;
pub mod session;

pub use format::{format_mmss, parse_duration};
pub use progress::{ProgressFeed, PROGRESS_CAPACITY};
pub use session::{
    SessionController, SessionDurations, SessionKind, SessionState, WORK_SESSIONS_PER_LONG_BREAK,
};
