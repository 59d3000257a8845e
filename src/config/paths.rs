//! Path resolution for pomotui configuration.
//!
//! pomotui keeps its files in `~/.pomotui/`:
//! - `config.yaml` - Timer and alert settings

use std::path::{Path, PathBuf};

use crate::error::PomoError;

/// Paths to pomotui configuration files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Config file: `~/.pomotui/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomoError> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| PomoError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(&PathBuf::from(home).join(".pomotui")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: &Path) -> Self {
        Self {
            config_file: root.join("config.yaml"),
        }
    }
}
