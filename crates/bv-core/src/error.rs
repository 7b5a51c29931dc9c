//! Error types for the bv-core crate.
//!
//! - [`ConfigError`] covers loading and validating the JSON configuration.
//! - [`ReferenceError`] covers the category and favourite-set tables.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use bv_core::ConfigError;
///
/// let error = ConfigError::InvalidOption {
///     option: "api.page_size".to_owned(),
///     reason: "must be positive".to_owned(),
/// };
/// assert!(error.to_string().contains("api.page_size"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`Config`](crate::Config).
    #[error("failed to parse configuration {path}: {source}")]
    Parse {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while loading a reference table from disk.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// The table file could not be read.
    #[error("failed to read reference table {path}: {source}")]
    Io {
        /// The table file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The table file is not in the expected JSON shape.
    #[error("failed to parse reference table {path}: {source}")]
    Parse {
        /// The table file path.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The table parsed but contains no entries.
    #[error("reference table {0} is empty")]
    Empty(Utf8PathBuf),
}
