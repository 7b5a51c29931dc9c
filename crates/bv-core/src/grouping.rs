//! Two-step grouping of raw inventory records.
//!
//! ```text
//! PartRecord*  ──(key: element id)──►  ElementAggregate*  ──(key: part number)──►  PartGroup*
//!              sum quantity,                               resolve category,
//!              last record wins                            append one Variant each
//! ```
//!
//! Both steps keep first-occurrence order and never sort. Empty input yields
//! empty output.

use smallvec::SmallVec;

use crate::collections::InsertionMap;
use crate::reference::CategoryTable;
use crate::types::{ElementAggregate, PartGroup, PartRecord};

/// Folds records into one aggregate per element id.
///
/// # Examples
///
/// ```
/// use bv_core::{PartRecord, grouping};
///
/// let aggregates = grouping::aggregate_elements(vec![
///     PartRecord::new("A", "3001", "Brick 2 x 4", "Red", 2),
///     PartRecord::new("B", "3001", "Brick 2 x 4", "Blue", 1),
///     PartRecord::new("A", "3001", "Brick 2 x 4", "Red", 3),
/// ]);
///
/// assert_eq!(aggregates.len(), 2);
/// assert_eq!(aggregates[0].quantity, 5);
/// ```
#[must_use]
pub fn aggregate_elements<I>(records: I) -> Vec<ElementAggregate>
where
    I: IntoIterator<Item = PartRecord>,
{
    let records = records.into_iter();
    let mut elements: InsertionMap<ElementAggregate> =
        InsertionMap::with_capacity(records.size_hint().0);

    for record in records {
        let key = record.element_id.clone();
        elements
            .entry_or_insert_with(&key, || ElementAggregate::empty(&key))
            .absorb(record);
    }

    elements.into_values()
}

/// Folds element aggregates into one group per part number.
///
/// The category name is resolved through `categories` when a group is first
/// created; later aggregates only contribute a variant.
#[must_use]
pub fn group_parts(aggregates: Vec<ElementAggregate>, categories: &CategoryTable) -> Vec<PartGroup> {
    let mut parts: InsertionMap<PartGroup> = InsertionMap::with_capacity(aggregates.len());

    for aggregate in aggregates {
        let group = parts.entry_or_insert_with(&aggregate.part_num, || PartGroup {
            part_num: aggregate.part_num.clone(),
            part_name: aggregate.part_name.clone(),
            category: categories.resolve(aggregate.category_id).to_owned(),
            variants: SmallVec::new(),
        });
        group.variants.push(aggregate.into_variant());
    }

    parts.into_values()
}

/// Runs both grouping steps.
///
/// # Examples
///
/// ```
/// use bv_core::{CategoryTable, PartRecord, grouping};
///
/// let groups = grouping::group(
///     vec![
///         PartRecord::new("A", "3001", "Brick 2 x 4", "Red", 2).with_category(11),
///         PartRecord::new("A", "3001", "Brick 2 x 4", "Red", 3).with_category(11),
///         PartRecord::new("B", "3001", "Brick 2 x 4", "Blue", 1).with_category(11),
///     ],
///     &CategoryTable::builtin(),
/// );
///
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].category, "Bricks");
/// assert_eq!(groups[0].variants[0].quantity, 5);
/// assert_eq!(groups[0].variants[1].color, "Blue");
/// ```
#[must_use]
pub fn group<I>(records: I, categories: &CategoryTable) -> Vec<PartGroup>
where
    I: IntoIterator<Item = PartRecord>,
{
    group_parts(aggregate_elements(records), categories)
}

#[cfg(test)]
mod tests {
    use crate::collections::FxHashSet;
    use crate::types::UNKNOWN;

    use super::*;

    fn record(element: &str, part: &str, color: &str, qty: u32) -> PartRecord {
        PartRecord::new(element, part, format!("Part {part}"), color, qty)
    }

    fn sample() -> Vec<PartRecord> {
        vec![
            record("A", "3001", "Red", 2),
            record("C", "3020", "Black", 4).with_category(14),
            record("A", "3001", "Red", 3),
            record("B", "3001", "Blue", 1),
            record("D", "3020", "White", 1).with_category(14),
            record("E", "6014", "Black", 4).with_category(29),
        ]
    }

    #[test]
    fn test_scenario_red_and_blue_bricks() {
        let groups = group(
            vec![
                record("A", "3001", "Red", 2),
                record("A", "3001", "Red", 3),
                record("B", "3001", "Blue", 1),
            ],
            &CategoryTable::builtin(),
        );

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.part_num, "3001");
        assert_eq!(group.variants.len(), 2);
        assert_eq!(group.variants[0].color, "Red");
        assert_eq!(group.variants[0].quantity, 5);
        assert_eq!(group.variants[1].color, "Blue");
        assert_eq!(group.variants[1].quantity, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(group(Vec::new(), &CategoryTable::builtin()).is_empty());
        assert!(aggregate_elements(Vec::new()).is_empty());
    }

    #[test]
    fn test_first_occurrence_order() {
        let groups = group(sample(), &CategoryTable::builtin());
        let parts: Vec<_> = groups.iter().map(|g| g.part_num.as_str()).collect();
        assert_eq!(parts, vec!["3001", "3020", "6014"]);

        let colors: Vec<_> = groups[1].variants.iter().map(|v| v.color.as_str()).collect();
        assert_eq!(colors, vec!["Black", "White"]);
    }

    #[test]
    fn test_deterministic() {
        let categories = CategoryTable::builtin();
        assert_eq!(group(sample(), &categories), group(sample(), &categories));
    }

    #[test]
    fn test_quantity_is_sum_of_records() {
        let records = sample();
        let aggregates = aggregate_elements(records.clone());
        for aggregate in &aggregates {
            let expected: u32 = records
                .iter()
                .filter(|r| r.element_id == aggregate.element_id)
                .map(|r| r.quantity)
                .sum();
            assert_eq!(aggregate.quantity, expected, "element {}", aggregate.element_id);
        }
    }

    #[test]
    fn test_grouping_is_a_refinement() {
        let records = sample();
        let groups = group(records.clone(), &CategoryTable::builtin());

        let mut seen = FxHashSet::default();
        for group in &groups {
            assert!(!group.variants.is_empty());
            for variant in &group.variants {
                assert!(seen.insert(variant.element_id.clone()), "duplicate element");
            }
        }

        let input: FxHashSet<_> = records.into_iter().map(|r| r.element_id).collect();
        assert_eq!(seen, input);
    }

    #[test]
    fn test_unmapped_category_is_unknown() {
        let groups = group(
            vec![record("A", "3001", "Red", 1), record("B", "x", "Red", 1).with_category(9999)],
            &CategoryTable::builtin(),
        );
        assert_eq!(groups[0].category, UNKNOWN);
        assert_eq!(groups[1].category, UNKNOWN);
    }

    #[test]
    fn test_category_resolved_from_first_aggregate() {
        let groups = group(sample(), &CategoryTable::builtin());
        assert_eq!(groups[1].category, "Plates Round Curved and Dishes");
        assert_eq!(groups[2].category, "Wheels and Tires");
    }
}
