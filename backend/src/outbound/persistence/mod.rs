//! PostgreSQL persistence adapter using Diesel.
//!
//! The adapter implements [`crate::domain::ports::CatalogueStore`] over a
//! `bb8` pool of `diesel-async` connections. Row structs (`models.rs`) and
//! table definitions (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use catalogue::outbound::persistence::{DbPool, DieselCatalogueStore, PoolConfig};
//!
//! # async fn connect() -> Result<(), catalogue::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/socksdb")).await?;
//! let store = DieselCatalogueStore::new(pool);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_catalogue_store;
mod diesel_helpers;
mod models;
mod pool;
mod schema;

pub use diesel_catalogue_store::DieselCatalogueStore;
pub use pool::{DbPool, PoolConfig, PoolError};
