//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::CatalogueServiceImpl;
use crate::domain::circuit_breaker::CircuitBreakerConfig;
use crate::domain::endpoints::Endpoints;
use crate::domain::ports::MockCatalogueStore;
use crate::inbound::http::state::HttpState;

pub use crate::test_support::sample_items;

/// Build handler state over a mocked store, without decorators or images.
pub fn state_over(store: MockCatalogueStore) -> HttpState {
    let service = CatalogueServiceImpl::new(Arc::new(store), Arc::new(DefaultClock));
    HttpState::new(
        Endpoints::new(Arc::new(service)),
        CircuitBreakerConfig::default(),
        Arc::new(DefaultClock),
    )
}
