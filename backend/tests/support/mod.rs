//! Shared fixtures for catalogue integration suites.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use catalogue::domain::circuit_breaker::CircuitBreakerConfig;
use catalogue::domain::decorators::{decorate, logging};
use catalogue::domain::endpoints::Endpoints;
use catalogue::domain::ports::{CatalogueStore, CatalogueStoreError};
use catalogue::domain::{CatalogueItem, CatalogueServiceImpl};
use catalogue::inbound::http::state::HttpState;
use catalogue::outbound::memory::InMemoryCatalogueStore;
use catalogue::test_support::{MutableClock, sample_items};
use chrono::{TimeZone, Utc};
use mockable::Clock;

/// In-memory store whose reads can be switched to fail.
pub struct FlakyStore {
    inner: InMemoryCatalogueStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn new(items: Vec<CatalogueItem>) -> Self {
        Self {
            inner: InMemoryCatalogueStore::from_items(items),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CatalogueStoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CatalogueStoreError::connection("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogueStore for FlakyStore {
    async fn items(
        &self,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<CatalogueItem>, CatalogueStoreError> {
        self.check()?;
        self.inner.items(tags).await
    }

    async fn item(&self, id: &str) -> Result<Option<CatalogueItem>, CatalogueStoreError> {
        self.check()?;
        self.inner.item(id).await
    }

    async fn tags(&self) -> Result<Vec<String>, CatalogueStoreError> {
        self.check()?;
        self.inner.tags().await
    }

    async fn ping(&self) -> Result<(), CatalogueStoreError> {
        self.check()
    }
}

/// Store, clock and handler state sharing one sample catalogue.
pub struct Harness {
    pub store: Arc<FlakyStore>,
    pub clock: Arc<MutableClock>,
    pub state: HttpState,
}

pub fn harness() -> Harness {
    let start = Utc
        .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let clock = Arc::new(MutableClock::new(start));
    let store = Arc::new(FlakyStore::new(sample_items()));
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let base = Arc::new(CatalogueServiceImpl::new(store.clone(), dyn_clock.clone()));
    let state = HttpState::new(
        Endpoints::new(decorate(base, [logging()])),
        CircuitBreakerConfig::default(),
        dyn_clock,
    );
    Harness {
        store,
        clock,
        state,
    }
}
