//! Outbound adapters implementing domain ports.
//!
//! - **memory**: fixed item list, optionally seeded from a JSON fixture.
//! - **persistence**: PostgreSQL via Diesel and `bb8`.
//!
//! Adapters translate between storage and domain types. Ordering, paging and
//! error presentation stay in the domain.

pub mod memory;
pub mod persistence;
