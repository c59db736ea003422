//! Storage-backed implementation of the catalogue contract.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{CatalogueService, CatalogueStore, CatalogueStoreError};
use crate::domain::{
    CATALOGUE_SERVICE, CATALOGUE_STORE_SERVICE, CatalogueItem, Error, HealthRecord, ListQuery,
    TraceId,
};

/// Message carried by [`crate::domain::ErrorCode::NotFound`] errors.
pub const NOT_FOUND_MESSAGE: &str = "not found";

fn map_store_error(error: CatalogueStoreError) -> Error {
    Error::upstream(format!("catalogue store failure: {error}"))
}

/// Catalogue contract implemented over a [`CatalogueStore`].
///
/// Filtering is delegated to the store; ordering, paging and tag
/// de-duplication happen here so all adapters behave identically.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use catalogue::domain::CatalogueServiceImpl;
/// use catalogue::outbound::memory::InMemoryCatalogueStore;
/// use mockable::DefaultClock;
///
/// let service = CatalogueServiceImpl::new(
///     Arc::new(InMemoryCatalogueStore::default()),
///     Arc::new(DefaultClock),
/// );
/// ```
#[derive(Clone)]
pub struct CatalogueServiceImpl {
    store: Arc<dyn CatalogueStore>,
    clock: Arc<dyn Clock>,
}

impl CatalogueServiceImpl {
    /// Create a service reading from `store` and stamping health records with
    /// `clock`.
    pub fn new(store: Arc<dyn CatalogueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl CatalogueService for CatalogueServiceImpl {
    async fn list(
        &self,
        query: &ListQuery,
        trace_id: TraceId,
    ) -> Result<Vec<CatalogueItem>, Error> {
        let matching = self
            .store
            .items(query.tags())
            .await
            .map_err(map_store_error)?;
        debug!(%trace_id, matching = matching.len(), "catalogue items matched tag filter");
        Ok(query.apply(matching))
    }

    async fn count(&self, tags: &BTreeSet<String>, _trace_id: TraceId) -> Result<usize, Error> {
        let matching = self.store.items(tags).await.map_err(map_store_error)?;
        Ok(matching.len())
    }

    async fn get(&self, id: &str, _trace_id: TraceId) -> Result<CatalogueItem, Error> {
        self.store
            .item(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    async fn tags(&self, _trace_id: TraceId) -> Result<Vec<String>, Error> {
        let tags = self.store.tags().await.map_err(map_store_error)?;
        let unique: BTreeSet<String> = tags.into_iter().collect();
        Ok(unique.into_iter().collect())
    }

    async fn health(&self) -> Vec<HealthRecord> {
        let store_record = match self.store.ping().await {
            Ok(()) => HealthRecord::ok(CATALOGUE_STORE_SERVICE, self.clock.utc()),
            Err(error) => {
                HealthRecord::err(CATALOGUE_STORE_SERVICE, error.to_string(), self.clock.utc())
            }
        };
        vec![
            HealthRecord::ok(CATALOGUE_SERVICE, self.clock.utc()),
            store_record,
        ]
    }
}
