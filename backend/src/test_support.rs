//! Test utilities for the catalogue crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{CatalogueItem, CatalogueItemDraft};

/// Clock whose time only moves when a test advances it.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use catalogue::test_support::MutableClock;
/// use chrono::{TimeZone, Utc};
/// use mockable::Clock;
///
/// let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid");
/// let clock = MutableClock::new(start);
/// clock.advance(Duration::from_secs(2));
/// assert_eq!((clock.utc() - start).num_seconds(), 2);
/// ```
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

fn sock(id: &str, name: &str, price: f64, count: u32, tags: &[&str]) -> CatalogueItem {
    let draft = CatalogueItemDraft {
        id: id.to_owned(),
        name: name.to_owned(),
        description: format!("{name} socks"),
        image_urls: vec![format!("/catalogue/images/{}.jpg", name.to_lowercase())],
        price,
        count,
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
    };
    match CatalogueItem::new(draft) {
        Ok(item) => item,
        Err(error) => panic!("invalid sample item {id}: {error}"),
    }
}

/// Five sample items; three of them are tagged `red` or `blue`.
///
/// Matching items ordered by price: `3`, `1`, `5`.
pub fn sample_items() -> Vec<CatalogueItem> {
    vec![
        sock("1", "Argyle", 12.5, 10, &["red", "formal"]),
        sock("2", "Bamboo", 7.0, 3, &["green"]),
        sock("3", "Crew", 4.99, 42, &["blue", "sport"]),
        sock("4", "Dotty", 9.5, 0, &["brown"]),
        sock("5", "Emerald", 18.0, 7, &["red", "blue"]),
    ]
}

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The crate avoids direct `std::fs` calls. These helpers write fixtures
    //! through `cap_std::fs::Dir` so suites share one access policy.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to `name` inside `directory`, creating or truncating it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catalogue::test_support::cap_fs::write_file;
    ///
    /// let root = tempfile::tempdir()?;
    /// write_file(root.path(), "sock.jpg", b"jpeg")?;
    /// assert!(root.path().join("sock.jpg").exists());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(directory: &Path, name: &str, contents: &[u8]) -> io::Result<()> {
        let directory = Dir::open_ambient_dir(directory, ambient_authority())?;
        directory.write(Path::new(name), contents)
    }
}

pub mod openapi {
    //! OpenAPI schema traversal helpers.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    /// Extract an `Object` schema, panicking with a diagnostic otherwise.
    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => {
                panic!(
                    "schema '{name}' is a $ref to '{}'; resolve the reference first",
                    reference.ref_location
                );
            }
            RefOr::T(Schema::Array(_)) => {
                panic!("schema '{name}' is an Array, not an Object");
            }
            _ => panic!("schema '{name}' has unexpected type"),
        }
    }

    /// Get a property from an Object schema by name.
    pub fn get_property<'a>(obj: &'a Object, field: &str) -> &'a RefOr<Schema> {
        match obj.properties.get(field) {
            Some(property) => property,
            None => panic!("property '{field}' not found"),
        }
    }
}
