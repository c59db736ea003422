//! Endpoint adapters: one typed request/response callable per contract method.
//!
//! Each endpoint opens a tracing span for its operation, resolves the trace
//! identifier in scope and forwards to the (decorated) catalogue contract.
//! Typed request and response structs replace a generic envelope, so there is
//! no runtime narrowing to get wrong.

mod requests;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, info_span};

use crate::domain::ports::CatalogueService;
use crate::domain::{CATALOGUE_SERVICE, Error, TraceId};

pub use requests::{
    CountRequest, CountResponse, GetRequest, GetResponse, HealthRequest, HealthResponse,
    ListRequest, ListResponse, TagsRequest, TagsResponse,
};

/// Uniform request-in/response-out callable.
///
/// A call either yields the typed response or the contract error, never both.
#[async_trait]
pub trait Endpoint<Req>: Send + Sync
where
    Req: Send + 'static,
{
    /// Successful response payload.
    type Response: Send;

    /// Handle one request.
    async fn call(&self, request: Req) -> Result<Self::Response, Error>;
}

/// Lists one page of items.
#[derive(Clone)]
pub struct ListEndpoint {
    service: Arc<dyn CatalogueService>,
}

#[async_trait]
impl Endpoint<ListRequest> for ListEndpoint {
    type Response = ListResponse;

    async fn call(&self, request: ListRequest) -> Result<ListResponse, Error> {
        let trace_id = TraceId::current_or_generate();
        let query = request.into_query();
        let span = info_span!(
            "list catalogue",
            service = CATALOGUE_SERVICE,
            tags = ?query.tags(),
            order = %query.order(),
            page_num = query.page_num(),
            page_size = query.page_size(),
            %trace_id,
        );
        async {
            let items = self.service.list(&query, trace_id).await?;
            Ok::<_, Error>(ListResponse { items })
        }
        .instrument(span)
        .await
    }
}

/// Counts items matching a tag filter.
#[derive(Clone)]
pub struct CountEndpoint {
    service: Arc<dyn CatalogueService>,
}

#[async_trait]
impl Endpoint<CountRequest> for CountEndpoint {
    type Response = CountResponse;

    async fn call(&self, request: CountRequest) -> Result<CountResponse, Error> {
        let trace_id = TraceId::current_or_generate();
        let span = info_span!(
            "count catalogue",
            service = CATALOGUE_SERVICE,
            tags = ?request.tags,
            %trace_id,
        );
        async {
            let size = self.service.count(&request.tags, trace_id).await?;
            Ok::<_, Error>(CountResponse { size })
        }
        .instrument(span)
        .await
    }
}

/// Fetches one item by identifier.
#[derive(Clone)]
pub struct GetEndpoint {
    service: Arc<dyn CatalogueService>,
}

#[async_trait]
impl Endpoint<GetRequest> for GetEndpoint {
    type Response = GetResponse;

    async fn call(&self, request: GetRequest) -> Result<GetResponse, Error> {
        let trace_id = TraceId::current_or_generate();
        let span = info_span!(
            "get catalogue",
            service = CATALOGUE_SERVICE,
            id = %request.id,
            %trace_id,
        );
        async {
            let item = self.service.get(&request.id, trace_id).await?;
            Ok::<_, Error>(GetResponse { item })
        }
        .instrument(span)
        .await
    }
}

/// Lists every distinct tag.
#[derive(Clone)]
pub struct TagsEndpoint {
    service: Arc<dyn CatalogueService>,
}

#[async_trait]
impl Endpoint<TagsRequest> for TagsEndpoint {
    type Response = TagsResponse;

    async fn call(&self, _request: TagsRequest) -> Result<TagsResponse, Error> {
        let trace_id = TraceId::current_or_generate();
        let span = info_span!("tags catalogue", service = CATALOGUE_SERVICE, %trace_id);
        async {
            let tags = self.service.tags(trace_id).await?;
            Ok::<_, Error>(TagsResponse { tags })
        }
        .instrument(span)
        .await
    }
}

/// Reports service and dependency health. Never fails.
#[derive(Clone)]
pub struct HealthEndpoint {
    service: Arc<dyn CatalogueService>,
}

#[async_trait]
impl Endpoint<HealthRequest> for HealthEndpoint {
    type Response = HealthResponse;

    async fn call(&self, _request: HealthRequest) -> Result<HealthResponse, Error> {
        let span = info_span!("health check", service = CATALOGUE_SERVICE);
        let health = self.service.health().instrument(span).await;
        Ok(HealthResponse { health })
    }
}

/// The five endpoints built over one contract value.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use catalogue::domain::endpoints::Endpoints;
/// use catalogue::domain::ports::CatalogueService;
///
/// fn build(service: Arc<dyn CatalogueService>) -> Endpoints {
///     Endpoints::new(service)
/// }
/// ```
#[derive(Clone)]
pub struct Endpoints {
    pub list: ListEndpoint,
    pub count: CountEndpoint,
    pub get: GetEndpoint,
    pub tags: TagsEndpoint,
    pub health: HealthEndpoint,
}

impl Endpoints {
    /// Adapt every contract method of `service`.
    pub fn new(service: Arc<dyn CatalogueService>) -> Self {
        Self {
            list: ListEndpoint {
                service: Arc::clone(&service),
            },
            count: CountEndpoint {
                service: Arc::clone(&service),
            },
            get: GetEndpoint {
                service: Arc::clone(&service),
            },
            tags: TagsEndpoint {
                service: Arc::clone(&service),
            },
            health: HealthEndpoint { service },
        }
    }
}
