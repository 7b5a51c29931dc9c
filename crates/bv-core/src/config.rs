//! Configuration structures for brickview.
//!
//! - [`ApiConfig`] - Catalog API endpoint, key, and paging
//! - [`ReferenceConfig`] - Optional on-disk reference tables
//! - [`TuiConfig`] - Terminal UI settings (tick rate, colors)
//! - [`Config`] - Root configuration combining all settings
//!
//! Every section is `#[serde(default)]`, so a configuration file only needs
//! the keys it wants to override.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default Rebrickable v3 LEGO endpoint.
pub const DEFAULT_BASE_URL: &str = "https://rebrickable.com/api/v3/lego";

/// Color scheme for the TUI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ColorScheme {
    /// Automatically detect based on terminal settings.
    #[default]
    Auto,
    /// Light color scheme (dark text on light background).
    Light,
    /// Dark color scheme (light text on dark background).
    Dark,
}

/// Settings for talking to the catalog API.
///
/// # Examples
///
/// ```
/// use bv_core::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(config.page_size, 1000);
/// assert!(config.api_key.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the LEGO catalog, without a trailing slash.
    pub base_url: String,

    /// API key sent as `Authorization: key <api_key>`.
    pub api_key: Option<String>,

    /// Records requested per inventory page.
    pub page_size: u32,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            page_size: 1000,
            timeout_secs: 30,
        }
    }
}

/// Locations of user-supplied reference tables.
///
/// When a path is `None` the built-in table is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// JSON object mapping category id to display name.
    pub categories_path: Option<Utf8PathBuf>,

    /// JSON array of `{ "set_num", "name" }` entries.
    pub favourites_path: Option<Utf8PathBuf>,
}

/// Configuration for the terminal user interface.
///
/// # Examples
///
/// ```
/// use bv_core::{ColorScheme, TuiConfig};
///
/// let config = TuiConfig::default();
/// assert_eq!(config.tick_rate_ms, 250);
/// assert_eq!(config.color_scheme, ColorScheme::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds (status message expiry).
    pub tick_rate_ms: u64,

    /// Redraws per second.
    pub frame_rate: u32,

    /// Color scheme for the interface.
    pub color_scheme: ColorScheme,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            frame_rate: 30,
            color_scheme: ColorScheme::Auto,
        }
    }
}

/// Root configuration for brickview.
///
/// # Examples
///
/// ```
/// use bv_core::Config;
///
/// let config: Config = serde_json::from_str(r#"{"default_set": "10497-1"}"#).unwrap();
/// assert_eq!(config.default_set.as_deref(), Some("10497-1"));
/// assert_eq!(config.api.page_size, 1000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API settings.
    pub api: ApiConfig,

    /// Reference table locations.
    pub reference: ReferenceConfig,

    /// Terminal UI settings.
    pub tui: TuiConfig,

    /// Set loaded when the browser starts.
    pub default_set: Option<String>,
}

impl Config {
    /// Reads a configuration file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON, or
    /// [`ConfigError::InvalidOption`] if a value is out of range.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first bad option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(invalid("api.base_url", "must not be empty"));
        }
        if self.api.page_size == 0 {
            return Err(invalid("api.page_size", "must be positive"));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be positive"));
        }
        if self.tui.tick_rate_ms == 0 {
            return Err(invalid("tui.tick_rate_ms", "must be positive"));
        }
        if self.tui.frame_rate == 0 {
            return Err(invalid("tui.frame_rate", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(option: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidOption {
        option: option.to_owned(),
        reason: reason.to_owned(),
    }
}
