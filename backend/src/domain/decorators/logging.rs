//! Structured call logging around the catalogue contract.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{Dispatch, info};

use crate::domain::ports::CatalogueService;
use crate::domain::{CatalogueItem, Error, HealthRecord, ListQuery, TraceId};

/// Logs every contract call with its inputs, a result summary, the error (if
/// any), elapsed time and the trace identifier.
///
/// Results and errors are returned untouched.
pub struct LoggingCatalogueService {
    next: Arc<dyn CatalogueService>,
    dispatch: Option<Dispatch>,
}

impl LoggingCatalogueService {
    /// Wrap `next`, logging through the ambient dispatcher.
    pub fn new(next: Arc<dyn CatalogueService>) -> Self {
        Self {
            next,
            dispatch: None,
        }
    }

    /// Log through `dispatch` instead of the ambient dispatcher.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    fn emit(&self, event: impl FnOnce()) {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, event),
            None => event(),
        }
    }
}

fn joined(tags: &BTreeSet<String>) -> String {
    tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn error_message<T>(result: &Result<T, Error>) -> Option<&str> {
    result.as_ref().err().map(Error::message)
}

#[async_trait]
impl CatalogueService for LoggingCatalogueService {
    async fn list(
        &self,
        query: &ListQuery,
        trace_id: TraceId,
    ) -> Result<Vec<CatalogueItem>, Error> {
        let begin = Instant::now();
        let result = self.next.list(query, trace_id).await;
        self.emit(|| {
            info!(
                method = "List",
                tags = %joined(query.tags()),
                order = %query.order(),
                page_num = query.page_num(),
                page_size = query.page_size(),
                result = result.as_ref().map_or(0, Vec::len),
                err = error_message(&result),
                took = ?begin.elapsed(),
                trace_id = %trace_id,
                "catalogue call"
            );
        });
        result
    }

    async fn count(&self, tags: &BTreeSet<String>, trace_id: TraceId) -> Result<usize, Error> {
        let begin = Instant::now();
        let result = self.next.count(tags, trace_id).await;
        self.emit(|| {
            info!(
                method = "Count",
                tags = %joined(tags),
                result = result.as_ref().copied().unwrap_or(0),
                err = error_message(&result),
                took = ?begin.elapsed(),
                trace_id = %trace_id,
                "catalogue call"
            );
        });
        result
    }

    async fn get(&self, id: &str, trace_id: TraceId) -> Result<CatalogueItem, Error> {
        let begin = Instant::now();
        let result = self.next.get(id, trace_id).await;
        self.emit(|| {
            info!(
                method = "Get",
                id,
                item = result.as_ref().ok().map(CatalogueItem::id),
                err = error_message(&result),
                took = ?begin.elapsed(),
                trace_id = %trace_id,
                "catalogue call"
            );
        });
        result
    }

    async fn tags(&self, trace_id: TraceId) -> Result<Vec<String>, Error> {
        let begin = Instant::now();
        let result = self.next.tags(trace_id).await;
        self.emit(|| {
            info!(
                method = "Tags",
                result = result.as_ref().map_or(0, Vec::len),
                err = error_message(&result),
                took = ?begin.elapsed(),
                trace_id = %trace_id,
                "catalogue call"
            );
        });
        result
    }

    async fn health(&self) -> Vec<HealthRecord> {
        let begin = Instant::now();
        let health = self.next.health().await;
        self.emit(|| {
            info!(
                method = "Health",
                result = health.len(),
                took = ?begin.elapsed(),
                "catalogue call"
            );
        });
        health
    }
}
