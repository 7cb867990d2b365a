//! Error types for chandebug

use thiserror::Error;

/// Main error type for debug channel operations
#[derive(Error, Debug)]
pub enum DebugError {
    /// Writing a rendered line to the output sink failed
    #[error("Sink error: {0}")]
    Sink(#[from] std::io::Error),

    /// A configuration value could not be interpreted
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using DebugError
pub type DebugResult<T> = Result<T, DebugError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DebugError::Config("unknown colour mode 'loud'".to_string());
        assert_eq!(format!("{}", err), "Config error: unknown colour mode 'loud'");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: DebugError = io_err.into();
        assert!(matches!(err, DebugError::Sink(_)));
        assert_eq!(err.to_string(), "Sink error: pipe closed");
    }
}
