//! Static reference tables.
//!
//! - [`CategoryTable`] maps catalog category ids to display names.
//! - [`FavouriteSets`] is the shortcut list offered by the set picker.
//!
//! Both ship with built-in contents and can be replaced by JSON files named in
//! [`ReferenceConfig`](crate::ReferenceConfig). They are loaded once at
//! startup and never mutated afterwards.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collections::FxHashMap;
use crate::config::ReferenceConfig;
use crate::error::ReferenceError;
use crate::types::UNKNOWN;

const BUILTIN_CATEGORIES: &[(u32, &str)] = &[
    (1, "Baseplates"),
    (2, "Bricks Printed"),
    (3, "Bricks Sloped"),
    (4, "Duplo, Quatro and Primo"),
    (5, "Bricks Special"),
    (6, "Bricks Wedged"),
    (7, "Containers"),
    (8, "Technic Bricks"),
    (9, "Plates Special"),
    (10, "Tiles Printed"),
    (11, "Bricks"),
    (12, "Technic Connectors"),
    (13, "Minifigs"),
    (14, "Plates Round Curved and Dishes"),
    (15, "Bricks Round and Cones"),
    (16, "Non-LEGO"),
    (17, "Non-Buildable Figures"),
    (18, "Hinges, Arms and Turntables"),
    (19, "Tiles Special"),
    (20, "Bricks Curved"),
    (21, "Plates Angled"),
    (22, "Pneumatics"),
    (23, "Panels"),
    (24, "Other"),
    (25, "Technic Steering, Suspension and Engine"),
    (26, "Technic Special"),
    (27, "Minifig Accessories"),
    (28, "Plants and Animals"),
    (29, "Wheels and Tires"),
    (30, "Tubes and Hoses"),
    (31, "String, Bands and Reels"),
    (32, "Bars, Ladders and Fences"),
    (33, "Windows and Doors"),
    (34, "Supports, Girders and Cranes"),
    (35, "Transportation - Land"),
    (36, "Transportation - Sea and Air"),
    (38, "Flags, Signs, Plastics and Cloth"),
    (39, "Magnets and Holders"),
    (40, "Technic Panels"),
    (41, "Large Buildable Figures"),
    (42, "Technic Axles"),
    (43, "Technic Beams"),
    (44, "Technic Gears"),
    (45, "Electronics"),
    (46, "Technic Beams Special"),
    (47, "Windscreens and Fuselage"),
    (49, "Plates"),
    (50, "Tiles Round and Curved"),
    (51, "Technic Pins"),
    (52, "Tiles"),
    (53, "Technic Bushes"),
    (54, "Technic Bricks Special"),
    (55, "Bricks Printed Special"),
    (67, "Rock"),
    (68, "Plates Printed"),
];

const BUILTIN_FAVOURITES: &[(&str, &str)] = &[
    ("75192-1", "Millennium Falcon"),
    ("10497-1", "Galaxy Explorer"),
    ("10294-1", "Titanic"),
    ("42143-1", "Ferrari Daytona SP3"),
    ("21318-1", "Tree House"),
    ("10300-1", "Back to the Future Time Machine"),
    ("71043-1", "Hogwarts Castle"),
];

/// Lookup table from category id to display name.
///
/// # Examples
///
/// ```
/// use bv_core::CategoryTable;
///
/// let table = CategoryTable::builtin();
/// assert_eq!(table.resolve(Some(29)), "Wheels and Tires");
/// assert_eq!(table.resolve(Some(9999)), "Unknown");
/// assert_eq!(table.resolve(None), "Unknown");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    names: FxHashMap<u32, String>,
}

impl CategoryTable {
    /// Returns the built-in category names.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_CATEGORIES
            .iter()
            .map(|&(id, name)| (id, name.to_owned()))
            .collect()
    }

    /// Parses a JSON object of `"id": "name"` pairs.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is not such an object.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let names: FxHashMap<u32, String> = serde_json::from_str(text)?;
        Ok(Self { names })
    }

    /// Loads a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceError`] if the file is unreadable, malformed, or
    /// empty.
    pub fn load(path: &Utf8Path) -> Result<Self, ReferenceError> {
        let text = read(path)?;
        let table = Self::from_json_str(&text).map_err(|source| ReferenceError::Parse {
            path: path.to_owned(),
            source,
        })?;
        if table.is_empty() {
            return Err(ReferenceError::Empty(path.to_owned()));
        }
        debug!(path = %path, categories = table.len(), "Loaded category table");
        Ok(table)
    }

    /// Returns the name for `id`, or [`UNKNOWN`] when missing or unmapped.
    #[must_use]
    pub fn resolve(&self, id: Option<u32>) -> &str {
        id.and_then(|id| self.names.get(&id))
            .map_or(UNKNOWN, String::as_str)
    }

    /// Returns the number of mapped ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no ids are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(u32, String)> for CategoryTable {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// A set offered as a shortcut in the set picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteSet {
    /// Set identifier.
    pub set_num: String,
    /// Display name.
    pub name: String,
}

impl FavouriteSet {
    /// Returns `Name (set-num)` for list display.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.set_num)
    }
}

/// Ordered list of favourite sets.
///
/// # Examples
///
/// ```
/// use bv_core::FavouriteSets;
///
/// let favourites = FavouriteSets::builtin();
/// assert_eq!(favourites.name_of("75192-1"), Some("Millennium Falcon"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouriteSets {
    entries: Vec<FavouriteSet>,
}

impl FavouriteSets {
    /// Returns the built-in favourites.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_FAVOURITES
                .iter()
                .map(|&(set_num, name)| FavouriteSet {
                    set_num: set_num.to_owned(),
                    name: name.to_owned(),
                })
                .collect(),
        }
    }

    /// Parses a JSON array of `{ "set_num", "name" }` objects.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is not such an array.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<FavouriteSet> = serde_json::from_str(text)?;
        Ok(Self { entries })
    }

    /// Loads favourites from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceError`] if the file is unreadable, malformed, or
    /// empty.
    pub fn load(path: &Utf8Path) -> Result<Self, ReferenceError> {
        let text = read(path)?;
        let favourites = Self::from_json_str(&text).map_err(|source| ReferenceError::Parse {
            path: path.to_owned(),
            source,
        })?;
        if favourites.is_empty() {
            return Err(ReferenceError::Empty(path.to_owned()));
        }
        debug!(path = %path, sets = favourites.len(), "Loaded favourite sets");
        Ok(favourites)
    }

    /// Returns the display name of a favourite set.
    #[must_use]
    pub fn name_of(&self, set_num: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|f| f.set_num == set_num)
            .map(|f| f.name.as_str())
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FavouriteSet> {
        self.entries.get(index)
    }

    /// Returns the first entry, used when no set is configured.
    #[must_use]
    pub fn first(&self) -> Option<&FavouriteSet> {
        self.entries.first()
    }

    /// Iterates over entries in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, FavouriteSet> {
        self.entries.iter()
    }

    /// Returns the number of favourites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no favourites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both reference tables, as used for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    /// Category id to name mapping.
    pub categories: CategoryTable,
    /// Set picker shortcuts.
    pub favourites: FavouriteSets,
}

impl ReferenceData {
    /// Returns the built-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            categories: CategoryTable::builtin(),
            favourites: FavouriteSets::builtin(),
        }
    }

    /// Loads the tables named in `config`, using built-ins for unset paths.
    pub fn load(config: &ReferenceConfig) -> Result<Self, ReferenceError> {
        let categories = match &config.categories_path {
            Some(path) => CategoryTable::load(path)?,
            None => CategoryTable::builtin(),
        };
        let favourites = match &config.favourites_path {
            Some(path) => FavouriteSets::load(path)?,
            None => FavouriteSets::builtin(),
        };
        Ok(Self {
            categories,
            favourites,
        })
    }
}

fn read(path: &Utf8Path) -> Result<String, ReferenceError> {
    std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_categories_resolve() {
        let table = CategoryTable::builtin();
        assert_eq!(table.resolve(Some(11)), "Bricks");
        assert_eq!(table.resolve(Some(29)), "Wheels and Tires");
        assert_eq!(table.resolve(None), UNKNOWN);
        assert_eq!(table.resolve(Some(0)), UNKNOWN);
    }

    #[test]
    fn test_categories_from_json() {
        let table = CategoryTable::from_json_str(r#"{"1": "Baseplates", "29": "Wheels"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(Some(29)), "Wheels");
    }

    #[test]
    fn test_categories_from_json_rejects_array() {
        assert!(CategoryTable::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_load_empty_table_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();
        assert!(matches!(
            CategoryTable::load(path),
            Err(ReferenceError::Empty(_))
        ));
    }

    #[test]
    fn test_load_favourites_file_keeps_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"set_num": "2-1", "name": "Second"}}, {{"set_num": "1-1", "name": "First"}}]"#
        )
        .unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();

        let favourites = FavouriteSets::load(path).unwrap();
        let order: Vec<_> = favourites.iter().map(|f| f.set_num.as_str()).collect();
        assert_eq!(order, vec!["2-1", "1-1"]);
        assert_eq!(favourites.first().map(FavouriteSet::label).as_deref(), Some("Second (2-1)"));
    }

    #[test]
    fn test_load_missing_favourites() {
        let err = FavouriteSets::load(Utf8Path::new("/nonexistent/favs.json")).unwrap_err();
        assert!(matches!(err, ReferenceError::Io { .. }));
    }

    #[test]
    fn test_reference_data_defaults_to_builtin() {
        let data = ReferenceData::load(&ReferenceConfig::default()).unwrap();
        assert_eq!(data, ReferenceData::builtin());
    }

    #[test]
    fn test_reference_data_uses_configured_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"29": "Wheels"}}"#).unwrap();
        let config = ReferenceConfig {
            categories_path: Some(Utf8Path::from_path(file.path()).unwrap().to_owned()),
            favourites_path: None,
        };

        let data = ReferenceData::load(&config).unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.favourites, FavouriteSets::builtin());
    }

    #[test]
    fn test_builtin_favourites() {
        let favourites = FavouriteSets::builtin();
        assert!(!favourites.is_empty());
        assert_eq!(favourites.get(0).map(|f| f.set_num.as_str()), Some("75192-1"));
        assert!(favourites.name_of("0000-1").is_none());
    }
}
