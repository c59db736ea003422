//! Decorator chain around the catalogue contract.
//!
//! A decorator takes a contract value and returns another value satisfying
//! the same contract, adding behaviour around each delegated call. Chains are
//! plain nesting: `decorate(base, [a, b])` yields `b(a(base))`.

mod logging;

use std::sync::Arc;

use crate::domain::ports::CatalogueService;

pub use logging::LoggingCatalogueService;

/// Wraps a catalogue contract value in another one.
pub type ServiceDecorator =
    Box<dyn FnOnce(Arc<dyn CatalogueService>) -> Arc<dyn CatalogueService> + Send>;

/// Apply `decorators` to `base`, first decorator innermost.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use catalogue::domain::decorators::{decorate, logging};
/// use catalogue::domain::ports::CatalogueService;
///
/// fn wire(base: Arc<dyn CatalogueService>) -> Arc<dyn CatalogueService> {
///     decorate(base, [logging()])
/// }
/// ```
pub fn decorate<I>(base: Arc<dyn CatalogueService>, decorators: I) -> Arc<dyn CatalogueService>
where
    I: IntoIterator<Item = ServiceDecorator>,
{
    decorators
        .into_iter()
        .fold(base, |service, decorator| decorator(service))
}

/// Logging decorator writing to the ambient `tracing` dispatcher.
#[must_use]
pub fn logging() -> ServiceDecorator {
    Box::new(|next| Arc::new(LoggingCatalogueService::new(next)))
}

/// Logging decorator writing to an explicit `tracing` dispatcher.
#[must_use]
pub fn logging_to(dispatch: tracing::Dispatch) -> ServiceDecorator {
    Box::new(move |next| Arc::new(LoggingCatalogueService::new(next).with_dispatch(dispatch)))
}

#[cfg(test)]
mod tests {
    //! Composition order coverage.
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{CatalogueItem, Error, HealthRecord, ListQuery, TraceId};

    /// Records its label on every `tags` call, then delegates.
    struct Recording {
        label: &'static str,
        calls: Arc<Mutex<Vec<&'static str>>>,
        next: Option<Arc<dyn CatalogueService>>,
    }

    #[async_trait]
    impl CatalogueService for Recording {
        async fn list(&self, _: &ListQuery, _: TraceId) -> Result<Vec<CatalogueItem>, Error> {
            Ok(Vec::new())
        }
        async fn count(&self, _: &BTreeSet<String>, _: TraceId) -> Result<usize, Error> {
            Ok(0)
        }
        async fn get(&self, _: &str, _: TraceId) -> Result<CatalogueItem, Error> {
            Err(Error::not_found("not found"))
        }
        async fn tags(&self, trace_id: TraceId) -> Result<Vec<String>, Error> {
            self.calls
                .lock()
                .expect("calls mutex")
                .push(self.label);
            match &self.next {
                Some(next) => next.tags(trace_id).await,
                None => Ok(Vec::new()),
            }
        }
        async fn health(&self) -> Vec<HealthRecord> {
            Vec::new()
        }
    }

    fn recording(
        label: &'static str,
        calls: &Arc<Mutex<Vec<&'static str>>>,
    ) -> ServiceDecorator {
        let calls = Arc::clone(calls);
        Box::new(move |next| {
            Arc::new(Recording {
                label,
                calls,
                next: Some(next),
            })
        })
    }

    #[tokio::test]
    async fn first_decorator_is_innermost() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let base: Arc<dyn CatalogueService> = Arc::new(Recording {
            label: "base",
            calls: Arc::clone(&calls),
            next: None,
        });

        let chain = decorate(
            base,
            [recording("inner", &calls), recording("outer", &calls)],
        );
        chain.tags(TraceId::generate()).await.expect("tags");

        assert_eq!(
            *calls.lock().expect("calls mutex"),
            ["outer", "inner", "base"]
        );
    }
}
