//! Catalogue item read-model entity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::CatalogueValidationError;

/// Input payload for [`CatalogueItem::new`].
///
/// Field names match the wire format so fixture files can be deserialised
/// straight into validated items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogueItemDraft {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_urls: Vec<String>,
    pub price: f64,
    pub count: u32,
    #[serde(rename = "tag", default)]
    pub tags: BTreeSet<String>,
}

/// Product listed in the catalogue.
///
/// Items are immutable once read from storage. Tags are kept as an ordered
/// set so serialisation is deterministic.
///
/// # Examples
/// ```
/// use catalogue::domain::{CatalogueItem, CatalogueItemDraft};
///
/// let item = CatalogueItem::new(CatalogueItemDraft {
///     id: "a0a4f044".into(),
///     name: "Holy".into(),
///     description: "Socks fit for a Messiah.".into(),
///     image_urls: vec!["/catalogue/images/holy_1.jpeg".into()],
///     price: 99.99,
///     count: 1,
///     tags: ["action".to_owned(), "magic".to_owned()].into(),
/// })
/// .expect("valid item");
/// assert!(item.has_any_tag(&["magic".to_owned()].into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogueItemDraft")]
pub struct CatalogueItem {
    id: String,
    name: String,
    description: String,
    #[serde(rename = "imageUrl")]
    image_urls: Vec<String>,
    price: f64,
    count: u32,
    #[serde(rename = "tag")]
    tags: BTreeSet<String>,
}

impl CatalogueItem {
    /// Validate and construct a catalogue item.
    pub fn new(draft: CatalogueItemDraft) -> Result<Self, CatalogueValidationError> {
        Self::try_from(draft)
    }

    /// Stable item identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Image paths, served under `/catalogue/images/`.
    #[must_use]
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    /// Unit price; never negative.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Units in stock.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Tags in ascending order.
    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Whether the item carries at least one of `wanted`.
    ///
    /// An empty `wanted` set matches every item.
    #[must_use]
    pub fn has_any_tag(&self, wanted: &BTreeSet<String>) -> bool {
        wanted.is_empty() || !self.tags.is_disjoint(wanted)
    }
}

impl TryFrom<CatalogueItemDraft> for CatalogueItem {
    type Error = CatalogueValidationError;

    fn try_from(draft: CatalogueItemDraft) -> Result<Self, Self::Error> {
        let CatalogueItemDraft {
            id,
            name,
            description,
            image_urls,
            price,
            count,
            tags,
        } = draft;

        if id.trim().is_empty() {
            return Err(CatalogueValidationError::EmptyField { field: "id" });
        }
        if !price.is_finite() || price < 0.0 {
            return Err(CatalogueValidationError::InvalidPrice { price });
        }
        let tags = tags
            .into_iter()
            .map(|tag| tag.trim().to_owned())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Self {
            id,
            name,
            description,
            image_urls,
            price,
            count,
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn draft() -> CatalogueItemDraft {
        CatalogueItemDraft {
            id: "3395a43e".to_owned(),
            name: "Figueroa".to_owned(),
            description: "enim officia aliqua excepteur esse deserunt".to_owned(),
            image_urls: vec!["/catalogue/images/WAT.jpg".to_owned()],
            price: 14.0,
            count: 808,
            tags: ["green".to_owned(), "formal".to_owned()].into(),
        }
    }

    #[rstest]
    fn rejects_blank_identifier(mut draft: CatalogueItemDraft) {
        draft.id = "  ".to_owned();
        assert_eq!(
            CatalogueItem::new(draft),
            Err(CatalogueValidationError::EmptyField { field: "id" })
        );
    }

    #[rstest]
    #[case(-0.01)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_invalid_price(mut draft: CatalogueItemDraft, #[case] price: f64) {
        draft.price = price;
        assert!(matches!(
            CatalogueItem::new(draft),
            Err(CatalogueValidationError::InvalidPrice { .. })
        ));
    }

    #[rstest]
    fn drops_blank_tags(mut draft: CatalogueItemDraft) {
        draft.tags.insert(" ".to_owned());
        let item = CatalogueItem::new(draft).expect("valid item");
        assert_eq!(item.tags().len(), 2);
    }

    #[rstest]
    #[case(&[], true)]
    #[case(&["green"], true)]
    #[case(&["blue", "formal"], true)]
    #[case(&["blue"], false)]
    fn tag_intersection(draft: CatalogueItemDraft, #[case] wanted: &[&str], #[case] matches: bool) {
        let item = CatalogueItem::new(draft).expect("valid item");
        let wanted = wanted.iter().map(|tag| (*tag).to_owned()).collect();
        assert_eq!(item.has_any_tag(&wanted), matches);
    }

    #[rstest]
    fn serialises_with_wire_field_names(draft: CatalogueItemDraft) {
        let item = CatalogueItem::new(draft).expect("valid item");
        let value = serde_json::to_value(&item).expect("serialise item");
        assert_eq!(
            value,
            json!({
                "id": "3395a43e",
                "name": "Figueroa",
                "description": "enim officia aliqua excepteur esse deserunt",
                "imageUrl": ["/catalogue/images/WAT.jpg"],
                "price": 14.0,
                "count": 808,
                "tag": ["formal", "green"],
            })
        );
    }

    #[rstest]
    fn deserialisation_validates() {
        let value = json!({
            "id": "",
            "name": "x",
            "description": "y",
            "price": 1.0,
            "count": 0,
        });
        assert!(serde_json::from_value::<CatalogueItem>(value).is_err());
    }
}
