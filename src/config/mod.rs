//! Configuration management for pomotui.
//!
//! This module handles loading configuration from `~/.pomotui/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{AlertConfig, Config, GeneralConfig, Settings, TimerConfig};
