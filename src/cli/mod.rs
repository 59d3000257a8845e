//! Command-line interface.

pub mod args;
pub mod completions;

pub use args::{Cli, OutputFormat};
pub use completions::generate_completions;
