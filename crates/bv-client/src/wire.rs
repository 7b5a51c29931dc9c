//! Catalog JSON shapes and their conversion into domain types.

use bv_core::{PartRecord, SetMetadata};
use serde::Deserialize;

/// `GET sets/{set_num}/`
#[derive(Debug, Deserialize)]
pub(crate) struct SetDto {
    set_num: String,
    name: String,
    year: u16,
    theme_id: u32,
    num_parts: u32,
    set_img_url: Option<String>,
}

impl SetDto {
    pub(crate) fn into_metadata(self) -> SetMetadata {
        let meta = SetMetadata::new(self.set_num, self.name, self.year, self.num_parts, self.theme_id);
        match self.set_img_url {
            Some(url) => meta.with_image_url(url),
            None => meta,
        }
    }
}

/// `GET themes/{theme_id}/`
#[derive(Debug, Deserialize)]
pub(crate) struct ThemeDto {
    pub(crate) name: String,
}

/// One page of `GET sets/{set_num}/parts/`.
#[derive(Debug, Deserialize)]
pub(crate) struct PartsPage {
    pub(crate) next: Option<String>,
    pub(crate) results: Vec<InventoryItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InventoryItem {
    part: PartDto,
    color: ColorDto,
    quantity: u32,
    element_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PartDto {
    part_num: String,
    name: String,
    part_cat_id: Option<u32>,
    part_img_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ColorDto {
    name: String,
}

impl InventoryItem {
    /// Converts to a record, keying element-less entries by part and color.
    pub(crate) fn into_record(self) -> PartRecord {
        let element_id = self
            .element_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| PartRecord::fallback_element_id(&self.part.part_num, &self.color.name));

        let mut record = PartRecord::new(
            element_id,
            self.part.part_num,
            self.part.name,
            self.color.name,
            self.quantity,
        );
        record.category_id = self.part.part_cat_id;
        record.image_url = self.part.part_img_url;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": 1,
                "inv_part_id": 10,
                "part": {
                    "part_num": "3001",
                    "name": "Brick 2 x 4",
                    "part_cat_id": 11,
                    "part_url": "https://rebrickable.com/parts/3001/",
                    "part_img_url": "https://cdn.rebrickable.com/media/parts/elements/300121.jpg"
                },
                "color": { "id": 4, "name": "Red", "rgb": "C91A09", "is_trans": false },
                "set_num": "75192-1",
                "quantity": 3,
                "is_spare": false,
                "element_id": "300121",
                "num_sets": 1000
            },
            {
                "id": 2,
                "part": { "part_num": "973pr1", "name": "Torso", "part_cat_id": null, "part_img_url": null },
                "color": { "id": 0, "name": "Black" },
                "quantity": 1,
                "is_spare": true,
                "element_id": null
            }
        ]
    }"#;

    #[test]
    fn test_parts_page_decodes() {
        let page: PartsPage = serde_json::from_str(PAGE).unwrap();
        assert!(page.next.is_none());
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    fn test_item_into_record() {
        let page: PartsPage = serde_json::from_str(PAGE).unwrap();
        let records: Vec<_> = page.results.into_iter().map(InventoryItem::into_record).collect();

        insta::assert_json_snapshot!(records[0], @r#"
        {
          "element_id": "300121",
          "part_num": "3001",
          "part_name": "Brick 2 x 4",
          "category_id": 11,
          "color_name": "Red",
          "quantity": 3,
          "image_url": "https://cdn.rebrickable.com/media/parts/elements/300121.jpg"
        }
        "#);
    }

    #[test]
    fn test_null_element_id_falls_back() {
        let page: PartsPage = serde_json::from_str(PAGE).unwrap();
        let record = page.results.into_iter().nth(1).unwrap().into_record();
        assert_eq!(record.element_id, "973pr1:Black");
        assert!(record.category_id.is_none());
        assert!(record.image_url.is_none());
    }

    #[test]
    fn test_set_dto_into_metadata() {
        let dto: SetDto = serde_json::from_str(
            r#"{"set_num":"75192-1","name":"Millennium Falcon","year":2017,"theme_id":171,
                "num_parts":7541,"set_img_url":"https://cdn.rebrickable.com/media/sets/75192-1.jpg",
                "set_url":"https://rebrickable.com/sets/75192-1/","last_modified_dt":"2023-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let meta = dto.into_metadata();
        assert_eq!(meta.title(), "Millennium Falcon (75192-1)");
        assert_eq!(meta.theme_id, 171);
        assert_eq!(meta.theme_name, bv_core::UNKNOWN);
        assert!(meta.image_url.is_some());
    }
}
