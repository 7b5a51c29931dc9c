//! Filter state and option derivation.
//!
//! [`FilterState`] is the single value object describing what the user wants
//! to see. It is mutated only through its setters and consumed by
//! [`gallery::project`](crate::gallery::project).
//!
//! On every change the caller runs [`FilterState::reconcile`], which derives
//! the currently selectable [`FilterOptions`] from the loaded groups and drops
//! any selection that is no longer offered. A selection therefore never names
//! an option the pickers do not show.
//!
//! # Examples
//!
//! ```
//! use bv_core::{CategoryTable, FilterState, PartRecord, SearchField, grouping};
//!
//! let groups = grouping::group(
//!     vec![
//!         PartRecord::new("A", "3001", "Brick", "Red", 1),
//!         PartRecord::new("B", "3001", "Brick", "Dark Red", 1),
//!         PartRecord::new("C", "3001", "Brick", "Blue", 1),
//!     ],
//!     &CategoryTable::builtin(),
//! );
//!
//! let mut filter = FilterState::default();
//! filter.toggle_color("Blue");
//! filter.set_search(SearchField::Color, "red");
//!
//! let options = filter.reconcile(&groups);
//! assert_eq!(options.colors, vec!["Dark Red", "Red"]);
//! assert!(filter.selected_colors().is_empty()); // "Blue" is no longer offered
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{PartGroup, Variant};

/// Which free-text search box a change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Substring of the variant color name.
    Color,
    /// Substring of the resolved category name.
    Category,
    /// Substring of the part name.
    PartName,
}

impl SearchField {
    /// All fields in display order.
    pub const ALL: [Self; 3] = [Self::Color, Self::Category, Self::PartName];

    /// Returns the label shown next to the search box.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Category => "Category",
            Self::PartName => "Part",
        }
    }

    /// Returns the next field in display order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Color => Self::Category,
            Self::Category => Self::PartName,
            Self::PartName => Self::Color,
        }
    }
}

/// Active search strings, exact-match selections, and minimum quantity.
///
/// The default value is the empty filter, which shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    color_search: String,
    category_search: String,
    part_search: String,
    colors: BTreeSet<String>,
    categories: BTreeSet<String>,
    min_quantity: u32,
}

impl FilterState {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the search text for `field`.
    #[must_use]
    pub fn search(&self, field: SearchField) -> &str {
        match field {
            SearchField::Color => &self.color_search,
            SearchField::Category => &self.category_search,
            SearchField::PartName => &self.part_search,
        }
    }

    /// Returns the exact-match color selection.
    #[must_use]
    pub const fn selected_colors(&self) -> &BTreeSet<String> {
        &self.colors
    }

    /// Returns the exact-match category selection.
    #[must_use]
    pub const fn selected_categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Returns the minimum variant quantity; `0` and `1` both disable it.
    #[must_use]
    pub const fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    /// Returns `true` if any field differs from the empty filter.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.color_search.is_empty()
            || !self.category_search.is_empty()
            || !self.part_search.is_empty()
            || !self.colors.is_empty()
            || !self.categories.is_empty()
            || self.min_quantity > 1
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    /// Replaces the search text for `field`.
    pub fn set_search(&mut self, field: SearchField, text: impl Into<String>) {
        *self.search_mut(field) = text.into();
    }

    /// Appends a character to the search text for `field`.
    pub fn push_search_char(&mut self, field: SearchField, c: char) {
        self.search_mut(field).push(c);
    }

    /// Removes the last character of the search text for `field`.
    pub fn pop_search_char(&mut self, field: SearchField) {
        self.search_mut(field).pop();
    }

    /// Adds `color` to the selection, or removes it if already selected.
    pub fn toggle_color(&mut self, color: &str) {
        toggle(&mut self.colors, color);
    }

    /// Adds `category` to the selection, or removes it if already selected.
    pub fn toggle_category(&mut self, category: &str) {
        toggle(&mut self.categories, category);
    }

    /// Sets the minimum variant quantity.
    pub fn set_min_quantity(&mut self, min_quantity: u32) {
        self.min_quantity = min_quantity;
    }

    /// Resets every field to the empty filter.
    ///
    /// ```
    /// use bv_core::{FilterState, SearchField};
    ///
    /// let mut filter = FilterState::default();
    /// filter.set_search(SearchField::PartName, "brick");
    /// filter.toggle_category("Bricks");
    /// filter.clear();
    /// assert_eq!(filter, FilterState::default());
    /// ```
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn search_mut(&mut self, field: SearchField) -> &mut String {
        match field {
            SearchField::Color => &mut self.color_search,
            SearchField::Category => &mut self.category_search,
            SearchField::PartName => &mut self.part_search,
        }
    }

    // -------------------------------------------------------------------------
    // Option derivation
    // -------------------------------------------------------------------------

    /// Drops selections that are not in `options`.
    pub fn prune(&mut self, options: &FilterOptions) {
        let before = self.colors.len() + self.categories.len();
        self.colors.retain(|c| options.colors.contains(c));
        self.categories.retain(|c| options.categories.contains(c));
        let dropped = before - self.colors.len() - self.categories.len();
        if dropped > 0 {
            debug!(dropped, "Pruned selections no longer offered");
        }
    }

    /// Derives the selectable options from `groups` and prunes the selection
    /// to match.
    pub fn reconcile(&mut self, groups: &[PartGroup]) -> FilterOptions {
        let options = FilterOptions::derive(groups, self);
        self.prune(&options);
        options
    }

    // -------------------------------------------------------------------------
    // Predicates
    // -------------------------------------------------------------------------

    /// Lower-cases the search strings once for repeated matching.
    #[must_use]
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher {
            state: self,
            color: self.color_search.to_lowercase(),
            category: self.category_search.to_lowercase(),
            part: self.part_search.to_lowercase(),
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_owned());
    }
}

/// Case-insensitive substring test; an empty needle always matches.
///
/// `needle_lower` must already be lower-case.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// A [`FilterState`] prepared for matching many groups.
#[derive(Debug)]
pub struct Matcher<'a> {
    state: &'a FilterState,
    color: String,
    category: String,
    part: String,
}

impl Matcher<'_> {
    /// Returns `true` if the group passes the part-name and category tests.
    #[must_use]
    pub fn accepts_group(&self, group: &PartGroup) -> bool {
        if !contains_ignore_case(&group.part_name, &self.part) {
            return false;
        }
        if !self.state.categories.is_empty() && !self.state.categories.contains(&group.category) {
            return false;
        }
        contains_ignore_case(&group.category, &self.category)
    }

    /// Returns `true` if the variant passes the color and quantity tests.
    #[must_use]
    pub fn accepts_variant(&self, variant: &Variant) -> bool {
        if !self.state.colors.is_empty() && !self.state.colors.contains(&variant.color) {
            return false;
        }
        variant.quantity >= self.state.min_quantity && contains_ignore_case(&variant.color, &self.color)
    }

    /// Returns `true` if `color` survives the color search.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        contains_ignore_case(color, &self.color)
    }

    /// Returns `true` if `category` survives the category search.
    #[must_use]
    pub fn offers_category(&self, category: &str) -> bool {
        contains_ignore_case(category, &self.category)
    }
}

/// Sorted, de-duplicated option lists for the exact-match pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Colors containing the color search text.
    pub colors: Vec<String>,
    /// Categories containing the category search text.
    pub categories: Vec<String>,
}

impl FilterOptions {
    /// Collects every variant color and group category, sorts them, and
    /// keeps those matching the corresponding search text.
    #[must_use]
    pub fn derive(groups: &[PartGroup], filter: &FilterState) -> Self {
        let matcher = filter.matcher();

        let colors: BTreeSet<&str> = groups
            .iter()
            .flat_map(|g| g.variants.iter().map(|v| v.color.as_str()))
            .collect();
        let categories: BTreeSet<&str> = groups.iter().map(|g| g.category.as_str()).collect();

        Self {
            colors: colors
                .into_iter()
                .filter(|c| matcher.offers_color(c))
                .map(str::to_owned)
                .collect(),
            categories: categories
                .into_iter()
                .filter(|c| matcher.offers_category(c))
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Returns `true` if neither list has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::reference::CategoryTable;
    use crate::types::PartRecord;
    use crate::grouping;

    use super::*;

    fn groups() -> Vec<PartGroup> {
        grouping::group(
            vec![
                PartRecord::new("A", "3001", "Brick 2 x 4", "Red", 2).with_category(11),
                PartRecord::new("B", "3001", "Brick 2 x 4", "Blue", 1).with_category(11),
                PartRecord::new("C", "6014", "Wheel 11mm", "Black", 4).with_category(29),
                PartRecord::new("D", "3020", "Plate 2 x 4", "Dark Red", 6),
            ],
            &CategoryTable::builtin(),
        )
    }

    #[test]
    fn test_default_is_inactive() {
        let filter = FilterState::default();
        assert!(!filter.is_active());
        assert_eq!(filter.search(SearchField::Color), "");
    }

    #[test]
    fn test_push_and_pop_search() {
        let mut filter = FilterState::default();
        filter.push_search_char(SearchField::PartName, 'b');
        filter.push_search_char(SearchField::PartName, 'r');
        assert_eq!(filter.search(SearchField::PartName), "br");
        filter.pop_search_char(SearchField::PartName);
        assert_eq!(filter.search(SearchField::PartName), "b");
        assert!(filter.is_active());
    }

    #[test]
    fn test_toggle_selection() {
        let mut filter = FilterState::default();
        filter.toggle_color("Red");
        assert!(filter.selected_colors().contains("Red"));
        filter.toggle_color("Red");
        assert!(filter.selected_colors().is_empty());
    }

    #[test]
    fn test_min_quantity_one_is_inactive() {
        let mut filter = FilterState::default();
        filter.set_min_quantity(1);
        assert!(!filter.is_active());
        filter.set_min_quantity(2);
        assert!(filter.is_active());
    }

    #[test]
    fn test_clear_is_total_and_idempotent() {
        let mut filter = FilterState::default();
        for field in SearchField::ALL {
            filter.set_search(field, "x");
        }
        filter.toggle_color("Red");
        filter.toggle_category("Bricks");
        filter.set_min_quantity(3);

        filter.clear();
        assert_eq!(filter, FilterState::default());
        filter.clear();
        assert_eq!(filter, FilterState::default());
    }

    #[test]
    fn test_options_sorted_and_unique() {
        let options = FilterOptions::derive(&groups(), &FilterState::default());
        assert_eq!(options.colors, vec!["Black", "Blue", "Dark Red", "Red"]);
        assert_eq!(options.categories, vec!["Bricks", "Unknown", "Wheels and Tires"]);
    }

    #[test]
    fn test_options_follow_search_text() {
        let mut filter = FilterState::default();
        filter.set_search(SearchField::Color, "RED");
        filter.set_search(SearchField::Category, "wheel");
        let options = FilterOptions::derive(&groups(), &filter);
        assert_eq!(options.colors, vec!["Dark Red", "Red"]);
        assert_eq!(options.categories, vec!["Wheels and Tires"]);
    }

    #[test]
    fn test_reconcile_prunes_stale_selection() {
        let mut filter = FilterState::default();
        filter.toggle_color("Red");
        filter.toggle_color("Blue");
        filter.toggle_category("Bricks");
        filter.set_search(SearchField::Color, "re");

        let options = filter.reconcile(&groups());
        assert!(filter.selected_colors().contains("Red"));
        assert!(!filter.selected_colors().contains("Blue"));
        assert!(filter.selected_categories().contains("Bricks"));
        for color in filter.selected_colors() {
            assert!(options.colors.contains(color));
        }
    }

    #[test]
    fn test_reconcile_with_no_data_drops_everything() {
        let mut filter = FilterState::default();
        filter.toggle_category("Bricks");
        let options = filter.reconcile(&[]);
        assert!(options.is_empty());
        assert!(filter.selected_categories().is_empty());
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Wheels and Tires", "wheel"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Bricks", "wheel"));
    }

    #[test]
    fn test_search_field_cycle() {
        assert_eq!(SearchField::Color.next(), SearchField::Category);
        assert_eq!(SearchField::PartName.next(), SearchField::Color);
        assert_eq!(SearchField::PartName.label(), "Part");
    }
}
