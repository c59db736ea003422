//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; they are converted into
//! validated [`CatalogueItem`] values before reaching the domain.

use diesel::prelude::*;

use super::schema::catalogue_items;
use crate::domain::{CatalogueItem, CatalogueItemDraft};

/// Row read from `catalogue_items`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = catalogue_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CatalogueItemRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub price: f64,
    pub count: i32,
    pub tags: Vec<String>,
}

/// One tag produced by `unnest(tags)`.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct TagRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub tag: String,
}

impl TryFrom<CatalogueItemRow> for CatalogueItem {
    type Error = String;

    fn try_from(row: CatalogueItemRow) -> Result<Self, Self::Error> {
        let count = u32::try_from(row.count)
            .map_err(|_| format!("item {} has negative count {}", row.id, row.count))?;
        let id = row.id.clone();
        CatalogueItem::new(CatalogueItemDraft {
            id: row.id,
            name: row.name,
            description: row.description,
            image_urls: row.image_urls,
            price: row.price,
            count,
            tags: row.tags.into_iter().collect(),
        })
        .map_err(|err| format!("item {id} is invalid: {err}"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> CatalogueItemRow {
        CatalogueItemRow {
            id: "808a2de1".to_owned(),
            name: "Colourful".to_owned(),
            description: "proident occaecat irure et excepteur labore".to_owned(),
            image_urls: vec!["/catalogue/images/colourful_socks.jpg".to_owned()],
            price: 18.0,
            count: 438,
            tags: vec!["brown".to_owned(), "blue".to_owned(), "brown".to_owned()],
        }
    }

    #[rstest]
    fn converts_valid_row(row: CatalogueItemRow) {
        let item = CatalogueItem::try_from(row).expect("valid row");
        assert_eq!(item.count(), 438);
        assert_eq!(
            item.tags().iter().map(String::as_str).collect::<Vec<_>>(),
            ["blue", "brown"]
        );
    }

    #[rstest]
    fn rejects_negative_count(mut row: CatalogueItemRow) {
        row.count = -1;
        let err = CatalogueItem::try_from(row).expect_err("negative count");
        assert_eq!(err, "item 808a2de1 has negative count -1");
    }

    #[rstest]
    fn rejects_negative_price(mut row: CatalogueItemRow) {
        row.price = -3.0;
        let err = CatalogueItem::try_from(row).expect_err("negative price");
        assert!(err.starts_with("item 808a2de1 is invalid"));
    }
}
