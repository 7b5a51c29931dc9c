//! Raw inventory records.

use serde::{Deserialize, Serialize};

/// One row of a set's parts listing.
///
/// A set can list the same element more than once (spares, sub-assemblies),
/// so records are folded into [`ElementAggregate`](crate::ElementAggregate)s
/// before display.
///
/// # Examples
///
/// ```
/// use bv_core::PartRecord;
///
/// let record = PartRecord::new("300121", "3001", "Brick 2 x 4", "Red", 4)
///     .with_category(11)
///     .with_image_url("https://cdn.rebrickable.com/media/parts/elements/300121.jpg");
///
/// assert_eq!(record.category_id, Some(11));
/// assert_eq!(record.quantity, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRecord {
    /// Element id (mold + color), or a `part_num:color` stand-in when the
    /// catalog has none.
    pub element_id: String,

    /// Part number of the mold.
    pub part_num: String,

    /// Human-readable part name.
    pub part_name: String,

    /// Catalog category id, if the part has one.
    pub category_id: Option<u32>,

    /// Color name.
    pub color_name: String,

    /// Quantity contributed by this row.
    pub quantity: u32,

    /// Image URL for the part in this color.
    pub image_url: Option<String>,
}

impl PartRecord {
    /// Creates a record without category or image.
    #[must_use]
    pub fn new(
        element_id: impl Into<String>,
        part_num: impl Into<String>,
        part_name: impl Into<String>,
        color_name: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            part_num: part_num.into(),
            part_name: part_name.into(),
            category_id: None,
            color_name: color_name.into(),
            quantity,
            image_url: None,
        }
    }

    /// Sets the category id.
    #[must_use]
    pub const fn with_category(mut self, category_id: u32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Builds the stand-in key used when the catalog omits an element id.
    ///
    /// ```
    /// use bv_core::PartRecord;
    ///
    /// assert_eq!(PartRecord::fallback_element_id("3001", "Red"), "3001:Red");
    /// ```
    #[must_use]
    pub fn fallback_element_id(part_num: &str, color_name: &str) -> String {
        format!("{part_num}:{color_name}")
    }
}
