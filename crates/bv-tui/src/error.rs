//! TUI-specific error types.

use thiserror::Error;

/// Errors that can occur in the TUI.
///
/// Catalog failures while browsing are shown in the status bar and never
/// reach this type; only failures that end the session do.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TuiError {
    /// Terminal initialization or operation failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Event channel was closed unexpectedly.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,

    /// Catalog client setup failed.
    #[error("catalog client error: {0}")]
    Client(#[from] bv_client::ClientError),

    /// A reference table could not be loaded.
    #[error("reference data error: {0}")]
    Reference(#[from] bv_core::ReferenceError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TuiError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = TuiError::config("invalid tick rate");
        assert!(matches!(err, TuiError::Config(_)));
        assert_eq!(err.to_string(), "configuration error: invalid tick rate");
    }

    #[test]
    fn test_error_display() {
        let err = TuiError::ChannelClosed;
        assert_eq!(err.to_string(), "event channel closed unexpectedly");
    }
}
