//! Filter-then-project step that decides which part cards are shown.
//!
//! For each group, in order:
//!
//! 1. part-name search must match the part name
//! 2. a non-empty category selection must contain the category
//! 3. category search must match the category
//! 4. variants are narrowed by color selection, color search, and minimum
//!    quantity
//! 5. groups left with no variants are skipped
//!
//! [`project`] returns index-based [`CardRef`]s that can be stored next to the
//! groups they point into; [`render`] resolves them into borrowed
//! [`PartCard`]s. Both are pure and re-run in full on every change.

use serde::Serialize;
use smallvec::SmallVec;

use crate::filter::FilterState;
use crate::types::{PartGroup, Variant};

/// Indices of one visible group and its visible variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRef {
    /// Index into the group slice.
    pub group: usize,
    /// Indices into that group's variants.
    pub variants: SmallVec<[usize; 4]>,
}

impl CardRef {
    /// Resolves the indices against `groups`.
    ///
    /// Returns `None` if the reference is stale (points past the end).
    #[must_use]
    pub fn resolve<'a>(&self, groups: &'a [PartGroup]) -> Option<PartCard<'a>> {
        let group = groups.get(self.group)?;
        let variants = self
            .variants
            .iter()
            .map(|&i| group.variants.get(i))
            .collect::<Option<Vec<&Variant>>>()?;
        Some(PartCard { group, variants })
    }
}

/// A visible part and the variants that passed the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartCard<'a> {
    /// The part group.
    pub group: &'a PartGroup,
    /// Visible variants, in group order.
    ///
    /// Kept a `Vec` so `PartCard` stays covariant in `'a`.
    pub variants: Vec<&'a Variant>,
}

impl PartCard<'_> {
    /// Sum of the visible variant quantities.
    #[must_use]
    pub fn visible_quantity(&self) -> u64 {
        self.variants.iter().map(|v| u64::from(v.quantity)).sum()
    }
}

/// Applies `filter` to `groups`, returning one [`CardRef`] per visible card.
///
/// # Examples
///
/// ```
/// use bv_core::{CategoryTable, FilterState, PartRecord, gallery, grouping};
///
/// let groups = grouping::group(
///     vec![
///         PartRecord::new("A", "3001", "Brick 2 x 4", "Red", 1),
///         PartRecord::new("B", "3001", "Brick 2 x 4", "Blue", 1),
///     ],
///     &CategoryTable::builtin(),
/// );
///
/// let mut filter = FilterState::default();
/// filter.toggle_color("Blue");
///
/// let cards = gallery::project(&groups, &filter);
/// assert_eq!(cards[0].variants.as_slice(), &[1]);
/// ```
#[must_use]
pub fn project(groups: &[PartGroup], filter: &FilterState) -> Vec<CardRef> {
    let matcher = filter.matcher();

    groups
        .iter()
        .enumerate()
        .filter(|(_, group)| matcher.accepts_group(group))
        .filter_map(|(index, group)| {
            let variants: SmallVec<[usize; 4]> = group
                .variants
                .iter()
                .enumerate()
                .filter(|(_, v)| matcher.accepts_variant(v))
                .map(|(i, _)| i)
                .collect();
            (!variants.is_empty()).then_some(CardRef {
                group: index,
                variants,
            })
        })
        .collect()
}

/// Applies `filter` to `groups`, returning borrowed cards ready to draw.
#[must_use]
pub fn render<'a>(groups: &'a [PartGroup], filter: &FilterState) -> Vec<PartCard<'a>> {
    project(groups, filter)
        .iter()
        .filter_map(|card| card.resolve(groups))
        .collect()
}

/// Counts shown in the gallery title and status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GallerySummary {
    /// Visible part cards.
    pub parts: usize,
    /// Visible variants across all cards.
    pub variants: usize,
    /// Pieces across visible variants.
    pub pieces: u64,
}

impl GallerySummary {
    /// Summarizes resolved cards.
    #[must_use]
    pub fn of_cards(cards: &[PartCard<'_>]) -> Self {
        Self {
            parts: cards.len(),
            variants: cards.iter().map(|c| c.variants.len()).sum(),
            pieces: cards.iter().map(PartCard::visible_quantity).sum(),
        }
    }

    /// Summarizes card references against their groups.
    #[must_use]
    pub fn of_refs(refs: &[CardRef], groups: &[PartGroup]) -> Self {
        let cards: Vec<_> = refs.iter().filter_map(|r| r.resolve(groups)).collect();
        Self::of_cards(&cards)
    }
}

#[cfg(test)]
mod tests {
    use crate::filter::SearchField;
    use crate::grouping;
    use crate::reference::CategoryTable;
    use crate::types::PartRecord;

    use super::*;

    fn groups() -> Vec<PartGroup> {
        grouping::group(
            vec![
                PartRecord::new("A", "3001", "Brick 2 x 4", "Red", 2).with_category(11),
                PartRecord::new("B", "3001", "Brick 2 x 4", "Blue", 1).with_category(11),
                PartRecord::new("C", "6014", "Wheel 11mm", "Black", 4).with_category(29),
                PartRecord::new("D", "87697", "Tire 21mm", "Black", 4).with_category(29),
                PartRecord::new("E", "3020", "Plate 2 x 4", "Dark Red", 6).with_category(49),
            ],
            &CategoryTable::builtin(),
        )
    }

    fn part_nums(cards: &[PartCard<'_>]) -> Vec<String> {
        cards.iter().map(|c| c.group.part_num.clone()).collect()
    }

    #[test]
    fn test_empty_filter_shows_everything() {
        let groups = groups();
        let cards = render(&groups, &FilterState::default());
        assert_eq!(cards.len(), groups.len());
        assert_eq!(cards[0].variants.len(), 2);
    }

    #[test]
    fn test_category_search_wheel() {
        let groups = groups();
        let mut filter = FilterState::default();
        filter.set_search(SearchField::Category, "wheel");

        let cards = render(&groups, &filter);
        assert_eq!(part_nums(&cards), vec!["6014", "87697"]);
        assert!(cards.iter().all(|c| c.group.category == "Wheels and Tires"));
    }

    #[test]
    fn test_part_name_search_is_case_insensitive() {
        let groups = groups();
        let mut filter = FilterState::default();
        filter.set_search(SearchField::PartName, "BRICK");
        assert_eq!(part_nums(&render(&groups, &filter)), vec!["3001"]);
    }

    #[test]
    fn test_category_selection() {
        let groups = groups();
        let mut filter = FilterState::default();
        filter.toggle_category("Plates");
        assert_eq!(part_nums(&render(&groups, &filter)), vec!["3020"]);
    }

    #[test]
    fn test_color_selection_and_search_combine() {
        let groups = groups();
        let mut filter = FilterState::default();
        filter.toggle_color("Red");
        filter.toggle_color("Dark Red");
        filter.set_search(SearchField::Color, "dark");

        let cards = render(&groups, &filter);
        assert_eq!(part_nums(&cards), vec!["3020"]);
        assert_eq!(cards[0].variants[0].color, "Dark Red");
    }

    #[test]
    fn test_group_without_visible_variants_is_skipped() {
        let groups = groups();
        let mut filter = FilterState::default();
        filter.toggle_color("Blue");

        let cards = render(&groups, &filter);
        assert_eq!(part_nums(&cards), vec!["3001"]);
        assert_eq!(cards[0].variants.len(), 1);
        assert_eq!(cards[0].variants[0].element_id, "B");
    }

    #[test]
    fn test_min_quantity_hides_small_variants() {
        let groups = groups();
        let mut filter = FilterState::default();
        filter.set_min_quantity(4);
        assert_eq!(part_nums(&render(&groups, &filter)), vec!["6014", "87697", "3020"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let groups = groups();
        let mut filter = FilterState::default();
        filter.set_search(SearchField::PartName, "zzz");
        assert!(render(&groups, &filter).is_empty());
        assert!(render(&[], &FilterState::default()).is_empty());
    }

    #[test]
    fn test_appending_search_never_grows_result() {
        let groups = groups();
        for field in SearchField::ALL {
            let mut filter = FilterState::default();
            let mut previous = GallerySummary::of_cards(&render(&groups, &filter));
            for c in "re".chars() {
                filter.push_search_char(field, c);
                let current = GallerySummary::of_cards(&render(&groups, &filter));
                assert!(current.parts <= previous.parts, "{field:?}");
                assert!(current.variants <= previous.variants, "{field:?}");
                previous = current;
            }
        }
    }

    #[test]
    fn test_summary() {
        let groups = groups();
        let refs = project(&groups, &FilterState::default());
        let summary = GallerySummary::of_refs(&refs, &groups);
        assert_eq!(summary.parts, 4);
        assert_eq!(summary.variants, 5);
        assert_eq!(summary.pieces, 17);
    }

    #[test]
    fn test_stale_card_ref_resolves_to_none() {
        let card = CardRef {
            group: 10,
            variants: SmallVec::new(),
        };
        assert!(card.resolve(&groups()).is_none());
    }
}
