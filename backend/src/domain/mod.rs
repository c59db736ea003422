//! Catalogue domain: read model, contract, decorators, endpoints and breakers.
//!
//! Purpose: hold the request-handling pipeline independently of actix and
//! diesel. Inbound adapters decode HTTP into endpoint requests; outbound
//! adapters implement [`ports::CatalogueStore`].
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failures.
//! - `TraceId`: request correlation identifier in task-local storage.
//! - `CatalogueItem`, `ListQuery`, `SortKey`, `HealthRecord`: read model.
//! - `CatalogueServiceImpl`: storage-backed contract implementation.
//! - `decorators`, `endpoints`, `circuit_breaker`: pipeline layers.

pub mod catalogue;
pub mod catalogue_service;
pub mod circuit_breaker;
pub mod decorators;
pub mod endpoints;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::catalogue::{
    CATALOGUE_SERVICE, CATALOGUE_STORE_SERVICE, CatalogueItem, CatalogueItemDraft,
    CatalogueValidationError, DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE, HealthRecord, HealthStatus,
    ListQuery, SortKey,
};
pub use self::catalogue_service::{CatalogueServiceImpl, NOT_FOUND_MESSAGE};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;

