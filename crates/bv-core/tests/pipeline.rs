//! End-to-end tests for the records -> groups -> options -> cards pipeline.

use bv_core::{
    CategoryTable, FilterState, GallerySummary, PartRecord, SearchField, gallery, grouping,
};

fn inventory() -> Vec<PartRecord> {
    vec![
        PartRecord::new("300121", "3001", "Brick 2 x 4", "Red", 2).with_category(11),
        PartRecord::new("300123", "3001", "Brick 2 x 4", "Blue", 1).with_category(11),
        PartRecord::new("300121", "3001", "Brick 2 x 4", "Red", 3).with_category(11),
        PartRecord::new("4140684", "6014", "Wheel 11mm D. x 6mm", "White", 4).with_category(29),
        PartRecord::new("4619323", "87697", "Tyre 21mm D. x 9.9mm", "Black", 4).with_category(29),
        PartRecord::new("302021", "3020", "Plate 2 x 4", "Red", 6).with_category(14),
        PartRecord::new("302026", "3020", "Plate 2 x 4", "Black", 2).with_category(14),
        PartRecord::new("x1:Pink", "x1", "Sticker Sheet", "Pink", 1),
    ]
}

#[test]
fn empty_filter_shows_every_group_and_variant() {
    let groups = grouping::group(inventory(), &CategoryTable::builtin());
    let cards = gallery::render(&groups, &FilterState::default());

    let summary = GallerySummary::of_cards(&cards);
    assert_eq!(summary.parts, 5);
    assert_eq!(summary.variants, 7);
    assert_eq!(summary.pieces, 23);
}

#[test]
fn options_follow_search_and_selection_is_pruned() {
    let groups = grouping::group(inventory(), &CategoryTable::builtin());
    let mut filter = FilterState::default();

    let options = filter.reconcile(&groups);
    assert_eq!(options.colors, vec!["Black", "Blue", "Pink", "Red", "White"]);
    assert_eq!(
        options.categories,
        vec!["Bricks", "Plates Round Curved and Dishes", "Unknown", "Wheels and Tires"]
    );

    filter.toggle_color("Black");
    filter.toggle_color("Red");
    filter.set_search(SearchField::Color, "bl");
    let options = filter.reconcile(&groups);

    assert_eq!(options.colors, vec!["Black", "Blue"]);
    assert_eq!(filter.selected_colors().iter().collect::<Vec<_>>(), vec!["Black"]);

    let cards = gallery::render(&groups, &filter);
    let parts: Vec<_> = cards.iter().map(|c| c.group.part_num.as_str()).collect();
    assert_eq!(parts, vec!["87697", "3020"]);
    assert_eq!(cards[1].variants.len(), 1);
    assert_eq!(cards[1].variants[0].color, "Black");
}

#[test]
fn category_search_and_min_quantity_compose() {
    let groups = grouping::group(inventory(), &CategoryTable::builtin());
    let mut filter = FilterState::default();
    filter.set_search(SearchField::Category, "WHEEL");
    filter.set_min_quantity(4);

    let cards = gallery::render(&groups, &filter);
    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|c| c.group.category == "Wheels and Tires"));

    filter.set_min_quantity(5);
    assert!(gallery::render(&groups, &filter).is_empty());
}

#[test]
fn clear_restores_full_gallery() {
    let groups = grouping::group(inventory(), &CategoryTable::builtin());
    let mut filter = FilterState::default();
    filter.set_search(SearchField::PartName, "plate");
    filter.toggle_category("Plates Round Curved and Dishes");
    filter.set_min_quantity(3);
    assert_eq!(gallery::render(&groups, &filter).len(), 1);

    filter.clear();
    assert!(!filter.is_active());
    assert_eq!(
        gallery::render(&groups, &filter).len(),
        gallery::render(&groups, &FilterState::default()).len()
    );
}

#[test]
fn cards_serialize_for_json_output() {
    let groups = grouping::group(inventory(), &CategoryTable::builtin());
    let mut filter = FilterState::default();
    filter.set_search(SearchField::PartName, "brick");

    let cards = gallery::render(&groups, &filter);
    let json = serde_json::to_value(&cards).unwrap();
    assert_eq!(json[0]["group"]["part_num"], "3001");
    assert_eq!(json[0]["variants"][0]["quantity"], 5);
    assert_eq!(json[0]["variants"][1]["color"], "Blue");
}
