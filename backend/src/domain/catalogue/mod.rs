//! Catalogue read-model domain types.
//!
//! Items, listing queries and health records flow unchanged through every
//! layer of the request pipeline once the storage collaborator produced them.

mod health;
mod item;
mod query;

pub use health::{CATALOGUE_SERVICE, CATALOGUE_STORE_SERVICE, HealthRecord, HealthStatus};
pub use item::{CatalogueItem, CatalogueItemDraft};
pub use query::{DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE, ListQuery, SortKey};

/// Validation errors returned by catalogue read-model constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogueValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("price must be a finite, non-negative number (got {price})")]
    InvalidPrice { price: f64 },
}
