//! Set metadata.

use serde::{Deserialize, Serialize};

use super::UNKNOWN;

/// Descriptive information about a LEGO set.
///
/// The catalog returns a theme id; the display name is resolved with a
/// separate lookup and stays [`UNKNOWN`] when that lookup fails.
///
/// # Examples
///
/// ```
/// use bv_core::SetMetadata;
///
/// let meta = SetMetadata::new("75192-1", "Millennium Falcon", 2017, 7541, 171)
///     .with_theme_name("Ultimate Collector Series");
/// assert_eq!(meta.title(), "Millennium Falcon (75192-1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMetadata {
    /// Set identifier, e.g. `75192-1`.
    pub set_num: String,
    /// Display name.
    pub name: String,
    /// Release year.
    pub year: u16,
    /// Total part count reported by the catalog.
    pub num_parts: u32,
    /// Box art URL.
    pub image_url: Option<String>,
    /// Catalog theme id.
    pub theme_id: u32,
    /// Resolved theme name.
    pub theme_name: String,
}

impl SetMetadata {
    /// Creates metadata with an unresolved theme and no image.
    #[must_use]
    pub fn new(
        set_num: impl Into<String>,
        name: impl Into<String>,
        year: u16,
        num_parts: u32,
        theme_id: u32,
    ) -> Self {
        Self {
            set_num: set_num.into(),
            name: name.into(),
            year,
            num_parts,
            image_url: None,
            theme_id,
            theme_name: UNKNOWN.to_owned(),
        }
    }

    /// Sets the resolved theme name.
    #[must_use]
    pub fn with_theme_name(mut self, theme_name: impl Into<String>) -> Self {
        self.theme_name = theme_name.into();
        self
    }

    /// Sets the box art URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Returns `Name (set-num)`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.set_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults_to_unknown() {
        let meta = SetMetadata::new("10497-1", "Galaxy Explorer", 2022, 1254, 721);
        assert_eq!(meta.theme_name, UNKNOWN);
        assert!(meta.image_url.is_none());
    }

    #[test]
    fn test_title() {
        let meta = SetMetadata::new("10497-1", "Galaxy Explorer", 2022, 1254, 721);
        assert_eq!(meta.title(), "Galaxy Explorer (10497-1)");
    }
}
