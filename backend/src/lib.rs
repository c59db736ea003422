//! Sock catalogue service library.
//!
//! Requests flow through four layers: the HTTP transport
//! ([`inbound::http`]), per-route circuit breakers
//! ([`domain::circuit_breaker`]), endpoint adapters ([`domain::endpoints`])
//! and the decorated catalogue contract ([`domain::ports::CatalogueService`]).
//! Storage adapters live in [`outbound`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
