//! The running timer.
//!
//! A [`CommandHandler`] in the foreground applies user commands to a shared
//! [`TimerCore`], and starts a [`TimerLoop`] on its own thread to count down.
//! Renderers receive [`DisplayEvent`]s through a [`DisplaySink`].

pub mod clock;
pub mod commands;
pub mod runner;
pub mod snapshot;

pub use clock::{Clock, TICK};
pub use commands::{Command, CommandHandler, Flow};
pub use runner::{TimerCore, TimerLoop};
pub use snapshot::{percent_complete, ChannelSink, DisplayEvent, DisplaySink, Snapshot};
