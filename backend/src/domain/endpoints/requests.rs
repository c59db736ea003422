//! Typed request and response values exchanged with endpoints.

use std::collections::BTreeSet;

use crate::domain::{CatalogueItem, HealthRecord, ListQuery, SortKey};

/// Parameters of `GET /catalogue`, already normalised by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListRequest {
    pub tags: BTreeSet<String>,
    pub order: SortKey,
    pub page_num: u32,
    pub page_size: u32,
}

impl ListRequest {
    /// Convert into a domain query, substituting defaults for zero paging.
    #[must_use]
    pub fn into_query(self) -> ListQuery {
        ListQuery::new(self.tags, self.order, self.page_num, self.page_size)
    }
}

/// One page of items.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse {
    pub items: Vec<CatalogueItem>,
}

/// Parameters of `GET /catalogue/size`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountRequest {
    pub tags: BTreeSet<String>,
}

/// Number of items matching the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountResponse {
    pub size: usize,
}

/// Parameters of `GET /catalogue/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub id: String,
}

/// A single item.
#[derive(Debug, Clone, PartialEq)]
pub struct GetResponse {
    pub item: CatalogueItem,
}

/// `GET /tags` takes no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagsRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

/// `GET /health` takes no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HealthRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub health: Vec<HealthRecord>,
}
