//! Driving port: the catalogue contract.
//!
//! Every storage-backed implementation and every decorator satisfies this
//! trait. Endpoints depend on `Arc<dyn CatalogueService>` only, so decorators
//! can be stacked without the transport noticing.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{CatalogueItem, Error, HealthRecord, ListQuery, TraceId};

/// Business-logic capability set of the catalogue.
///
/// `trace_id` is correlation data for observability and never influences
/// results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueService: Send + Sync {
    /// Filter by tags, sort and return one page of items.
    ///
    /// Pages past the end return an empty vector rather than an error.
    async fn list(&self, query: &ListQuery, trace_id: TraceId)
    -> Result<Vec<CatalogueItem>, Error>;

    /// Count items matching the tag filter, ignoring paging.
    async fn count(&self, tags: &BTreeSet<String>, trace_id: TraceId) -> Result<usize, Error>;

    /// Fetch one item; fails with [`crate::domain::ErrorCode::NotFound`] when
    /// no item has `id`.
    async fn get(&self, id: &str, trace_id: TraceId) -> Result<CatalogueItem, Error>;

    /// All distinct tags, sorted ascending.
    async fn tags(&self, trace_id: TraceId) -> Result<Vec<String>, Error>;

    /// Report the health of the service and its dependencies. Never fails.
    async fn health(&self) -> Vec<HealthRecord>;
}
