//! Domain ports and supporting types for the hexagonal boundary.

mod catalogue_service;
mod catalogue_store;
mod macros;

use macros::define_port_error;

#[cfg(test)]
pub use catalogue_service::MockCatalogueService;
pub use catalogue_service::CatalogueService;
#[cfg(test)]
pub use catalogue_store::MockCatalogueStore;
pub use catalogue_store::{CatalogueStore, CatalogueStoreError};
