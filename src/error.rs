//! Error types for pomotui.

use thiserror::Error;

/// Errors produced by pomotui.
///
/// Only startup (configuration, terminal setup) and alert dispatch can fail.
/// The session state machine itself is total and never returns an error.
#[derive(Debug, Error)]
pub enum PomoError {
    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input that could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal setup, drawing, or event polling failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The alert mechanism failed.
    #[error("Alert failed: {0}")]
    Alert(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PomoError::Config("work duration must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: work duration must be positive"
        );

        let err = PomoError::Alert("play: not found".to_string());
        assert_eq!(err.to_string(), "Alert failed: play: not found");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PomoError = io.into();
        assert!(matches!(err, PomoError::Io(_)));
    }
}
