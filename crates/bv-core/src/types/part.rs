//! Aggregated part types.
//!
//! [`ElementAggregate`] is the per-element fold of raw records;
//! [`PartGroup`] collects every element that shares a part number, each as a
//! [`Variant`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::record::PartRecord;

/// Total quantity of one physical element (mold + color) in a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementAggregate {
    /// Element id.
    pub element_id: String,
    /// Part number of the mold.
    pub part_num: String,
    /// Part name.
    pub part_name: String,
    /// Catalog category id.
    pub category_id: Option<u32>,
    /// Color name.
    pub color_name: String,
    /// Sum of the quantities of every record with this element id.
    pub quantity: u32,
    /// Representative image URL.
    pub image_url: Option<String>,
}

impl ElementAggregate {
    /// Starts an aggregate with zero quantity keyed by `element_id`.
    #[must_use]
    pub fn empty(element_id: &str) -> Self {
        Self {
            element_id: element_id.to_owned(),
            part_num: String::new(),
            part_name: String::new(),
            category_id: None,
            color_name: String::new(),
            quantity: 0,
            image_url: None,
        }
    }

    /// Folds a record into this aggregate.
    ///
    /// The quantity is added; every other field is overwritten by the
    /// record, so the last record seen for an element wins.
    ///
    /// ```
    /// use bv_core::{ElementAggregate, PartRecord};
    ///
    /// let mut aggregate = ElementAggregate::empty("A");
    /// aggregate.absorb(PartRecord::new("A", "3001", "Brick", "Red", 2));
    /// aggregate.absorb(PartRecord::new("A", "3001", "Brick", "Red", 3));
    /// assert_eq!(aggregate.quantity, 5);
    /// ```
    pub fn absorb(&mut self, record: PartRecord) {
        self.quantity = self.quantity.saturating_add(record.quantity);
        self.part_num = record.part_num;
        self.part_name = record.part_name;
        self.category_id = record.category_id;
        self.color_name = record.color_name;
        self.image_url = record.image_url;
    }

    /// Converts the aggregate into the variant shown under its part.
    #[must_use]
    pub fn into_variant(self) -> Variant {
        Variant {
            color: self.color_name,
            quantity: self.quantity,
            element_id: self.element_id,
            image_url: self.image_url,
        }
    }
}

/// One colorway of a part within a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Color name.
    pub color: String,
    /// Quantity of this element in the set.
    pub quantity: u32,
    /// Element id.
    pub element_id: String,
    /// Image URL.
    pub image_url: Option<String>,
}

/// Every element of a set sharing one part number.
///
/// Variants keep the order their aggregates were first encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartGroup {
    /// Part number.
    pub part_num: String,
    /// Part name.
    pub part_name: String,
    /// Resolved category name, or [`UNKNOWN`](crate::UNKNOWN).
    pub category: String,
    /// Color variants.
    ///
    /// Most parts come in one to four colors within a set.
    pub variants: SmallVec<[Variant; 4]>,
}

impl PartGroup {
    /// Total number of pieces across all variants.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.variants.iter().map(|v| u64::from(v.quantity)).sum()
    }

    /// Returns the variant for `element_id`, if present.
    #[must_use]
    pub fn variant(&self, element_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.element_id == element_id)
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn variant(color: &str, quantity: u32, element_id: &str) -> Variant {
        Variant {
            color: color.to_owned(),
            quantity,
            element_id: element_id.to_owned(),
            image_url: None,
        }
    }

    #[test]
    fn test_absorb_last_record_wins_for_metadata() {
        let mut aggregate = ElementAggregate::empty("A");
        aggregate.absorb(PartRecord::new("A", "3001", "Old name", "Red", 1).with_category(11));
        aggregate.absorb(
            PartRecord::new("A", "3001", "New name", "Red", 1).with_image_url("img"),
        );

        assert_eq!(aggregate.quantity, 2);
        assert_eq!(aggregate.part_name, "New name");
        assert_eq!(aggregate.category_id, None);
        assert_eq!(aggregate.image_url.as_deref(), Some("img"));
    }

    #[test]
    fn test_absorb_saturates() {
        let mut aggregate = ElementAggregate::empty("A");
        aggregate.absorb(PartRecord::new("A", "p", "n", "c", u32::MAX));
        aggregate.absorb(PartRecord::new("A", "p", "n", "c", 5));
        assert_eq!(aggregate.quantity, u32::MAX);
    }

    #[test]
    fn test_into_variant() {
        let mut aggregate = ElementAggregate::empty("A");
        aggregate.absorb(PartRecord::new("A", "3001", "Brick", "Red", 3));
        let v = aggregate.into_variant();
        assert_eq!(v, variant("Red", 3, "A"));
    }

    #[test]
    fn test_total_quantity_and_lookup() {
        let group = PartGroup {
            part_num: "3001".to_owned(),
            part_name: "Brick 2 x 4".to_owned(),
            category: "Bricks".to_owned(),
            variants: smallvec![variant("Red", 5, "A"), variant("Blue", 1, "B")],
        };
        assert_eq!(group.total_quantity(), 6);
        assert_eq!(group.variant("B").map(|v| v.color.as_str()), Some("Blue"));
        assert!(group.variant("C").is_none());
    }

    #[test]
    fn test_variant_json_snapshot() {
        insta::assert_json_snapshot!(variant("Red", 5, "A"), @r#"
        {
          "color": "Red",
          "quantity": 5,
          "element_id": "A",
          "image_url": null
        }
        "#);
    }
}
