//! pomotui - A Pomodoro timer for the terminal
//!
//! This crate provides the timer core (interval sequencing, countdown loop and
//! progress history) together with a full-screen terminal UI and a
//! line-oriented headless front end.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod alert;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod headless;
pub mod logging;
pub mod timer;
pub mod tui;

pub use cli::args::{Cli, OutputFormat};
pub use error::PomoError;
pub use timer::{Command, CommandHandler, TimerCore};
