//! Error types for the bv-client crate.

/// Errors raised while talking to the catalog.
///
/// # Error Recovery Strategy
///
/// - **Upstream errors** ([`ClientError::Http`], [`ClientError::Status`],
///   [`ClientError::Decode`]): recoverable. Metadata failures are shown inline
///   for the requested set, theme failures fall back to `"Unknown"`, and page
///   failures truncate the inventory.
/// - **Setup errors** (everything else): fatal, reported before the UI starts.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The catalog answered with a non-200 status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not the expected JSON.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// No API key was configured.
    #[error("no API key configured (use --api-key or REBRICKABLE_API_KEY)")]
    MissingApiKey,

    /// The API key cannot be sent as a header value.
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    /// The configured base URL does not parse.
    #[error("invalid base URL {0:?}")]
    InvalidBaseUrl(String),

    /// A set id that cannot be used as a path segment.
    #[error("invalid set id {0:?}")]
    InvalidSetNum(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// Creates a [`ClientError::Status`] error.
    #[inline]
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Returns `true` for upstream failures the session can continue past.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Status { .. } | Self::Decode { .. } | Self::InvalidSetNum(_)
        )
    }

    /// Returns the HTTP status, if the catalog answered at all.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
