//! Storage port consumed by the catalogue service.
//!
//! The port hides row storage, indexing and the SQL dialect. Adapters only
//! have to answer tag-filtered reads; ordering and paging stay in the domain
//! so every adapter produces identical listings.

use std::collections::BTreeSet;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::CatalogueItem;

define_port_error! {
    /// Errors raised by catalogue storage adapters.
    pub enum CatalogueStoreError {
        /// The store could not be reached.
        Connection { message: String } => "catalogue store connection failed: {message}",
        /// A query failed during execution or row conversion.
        Query { message: String } => "catalogue store query failed: {message}",
    }
}

/// Port for reading catalogue items from persistent state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueStore: Send + Sync {
    /// Return every item whose tags intersect `tags`, in any order.
    ///
    /// An empty `tags` set returns the whole catalogue.
    async fn items(&self, tags: &BTreeSet<String>)
    -> Result<Vec<CatalogueItem>, CatalogueStoreError>;

    /// Look up one item by identifier.
    async fn item(&self, id: &str) -> Result<Option<CatalogueItem>, CatalogueStoreError>;

    /// Return all tag names known to the store. Duplicates are tolerated.
    async fn tags(&self) -> Result<Vec<String>, CatalogueStoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), CatalogueStoreError>;
}
