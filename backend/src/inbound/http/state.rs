//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`. Every route owns
//! its own breaker-wrapped endpoint, so a failing route never trips another.

use std::sync::Arc;

use cap_std::fs::Dir;
use mockable::Clock;

use crate::domain::circuit_breaker::{BreakerEndpoint, CircuitBreaker, CircuitBreakerConfig};
use crate::domain::endpoints::{
    CountEndpoint, Endpoints, GetEndpoint, HealthEndpoint, ListEndpoint, TagsEndpoint,
};

/// Breaker label of `GET /catalogue`.
pub const LIST_ROUTE: &str = "GET /catalogue";
/// Breaker label of `GET /catalogue/size`.
pub const COUNT_ROUTE: &str = "GET /catalogue/size";
/// Breaker label of `GET /catalogue/{id}`.
pub const GET_ROUTE: &str = "GET /catalogue/{id}";
/// Breaker label of `GET /tags`.
pub const TAGS_ROUTE: &str = "GET /tags";
/// Breaker label of `GET /health`.
pub const HEALTH_ROUTE: &str = "GET /health";

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub list: BreakerEndpoint<ListEndpoint>,
    pub count: BreakerEndpoint<CountEndpoint>,
    pub get: BreakerEndpoint<GetEndpoint>,
    pub tags: BreakerEndpoint<TagsEndpoint>,
    pub health: BreakerEndpoint<HealthEndpoint>,
    /// Image directory; `None` serves 404 for every image.
    pub images: Option<Arc<Dir>>,
}

impl HttpState {
    /// Wrap each endpoint in a fresh breaker built from `config` and `clock`.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use catalogue::domain::circuit_breaker::CircuitBreakerConfig;
    /// use catalogue::domain::endpoints::Endpoints;
    /// use catalogue::domain::CatalogueServiceImpl;
    /// use catalogue::inbound::http::state::HttpState;
    /// use catalogue::outbound::memory::InMemoryCatalogueStore;
    /// use mockable::DefaultClock;
    ///
    /// let service = CatalogueServiceImpl::new(
    ///     Arc::new(InMemoryCatalogueStore::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(
    ///     Endpoints::new(Arc::new(service)),
    ///     CircuitBreakerConfig::default(),
    ///     Arc::new(DefaultClock),
    /// );
    /// assert!(state.images.is_none());
    /// ```
    pub fn new(endpoints: Endpoints, config: CircuitBreakerConfig, clock: Arc<dyn Clock>) -> Self {
        let breaker =
            |route: &str| Arc::new(CircuitBreaker::new(route, config, Arc::clone(&clock)));
        let Endpoints {
            list,
            count,
            get,
            tags,
            health,
        } = endpoints;
        Self {
            list: BreakerEndpoint::new(list, breaker(LIST_ROUTE)),
            count: BreakerEndpoint::new(count, breaker(COUNT_ROUTE)),
            get: BreakerEndpoint::new(get, breaker(GET_ROUTE)),
            tags: BreakerEndpoint::new(tags, breaker(TAGS_ROUTE)),
            health: BreakerEndpoint::new(health, breaker(HEALTH_ROUTE)),
            images: None,
        }
    }

    /// Serve images from `images`.
    #[must_use]
    pub fn with_images(mut self, images: Dir) -> Self {
        self.images = Some(Arc::new(images));
        self
    }
}
