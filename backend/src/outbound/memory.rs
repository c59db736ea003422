//! In-process catalogue store backed by a fixed item list.
//!
//! Used when no database URL is configured, and by integration tests. Items
//! can be seeded from a JSON fixture in the wire format.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::info;

use crate::domain::CatalogueItem;
use crate::domain::ports::{CatalogueStore, CatalogueStoreError};

/// Errors raised while loading a fixture file.
#[derive(Debug, thiserror::Error)]
pub enum FixtureLoadError {
    #[error("failed to read catalogue fixture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse catalogue fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only catalogue held in memory.
///
/// # Examples
/// ```
/// use catalogue::outbound::memory::InMemoryCatalogueStore;
///
/// let store = InMemoryCatalogueStore::default();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogueStore {
    items: Arc<Vec<CatalogueItem>>,
}

impl InMemoryCatalogueStore {
    pub fn from_items(items: Vec<CatalogueItem>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    /// Load items from a JSON array file.
    ///
    /// Every entry is validated the same way as [`CatalogueItem::new`].
    pub fn from_json_file(path: &Path) -> Result<Self, FixtureLoadError> {
        let read_error = |source| FixtureLoadError::Read {
            path: path.to_path_buf(),
            source,
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path.file_name().ok_or_else(|| {
            read_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "fixture path has no file name",
            ))
        })?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let raw = directory.read_to_string(file_name).map_err(read_error)?;
        let items: Vec<CatalogueItem> =
            serde_json::from_str(&raw).map_err(|source| FixtureLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), items = items.len(), "loaded catalogue fixture");
        Ok(Self::from_items(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl CatalogueStore for InMemoryCatalogueStore {
    async fn items(
        &self,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<CatalogueItem>, CatalogueStoreError> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.has_any_tag(tags))
            .cloned()
            .collect())
    }

    async fn item(&self, id: &str) -> Result<Option<CatalogueItem>, CatalogueStoreError> {
        Ok(self.items.iter().find(|item| item.id() == id).cloned())
    }

    async fn tags(&self) -> Result<Vec<String>, CatalogueStoreError> {
        Ok(self
            .items
            .iter()
            .flat_map(|item| item.tags().iter().cloned())
            .collect())
    }

    async fn ping(&self) -> Result<(), CatalogueStoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::test_support::cap_fs::write_file;
    use crate::test_support::sample_items;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryCatalogueStore {
        InMemoryCatalogueStore::from_items(sample_items())
    }

    fn tags(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|tag| (*tag).to_owned()).collect()
    }

    #[rstest]
    #[case(&[], 5)]
    #[case(&["red"], 2)]
    #[case(&["red", "blue"], 3)]
    #[case(&["purple"], 0)]
    #[tokio::test]
    async fn filters_by_any_tag(
        store: InMemoryCatalogueStore,
        #[case] wanted: &[&str],
        #[case] expected: usize,
    ) {
        let items = store.items(&tags(wanted)).await.expect("items");
        assert_eq!(items.len(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn looks_up_by_identifier(store: InMemoryCatalogueStore) {
        let found = store.item("3").await.expect("lookup");
        assert_eq!(found.map(|item| item.name().to_owned()).as_deref(), Some("Crew"));
        assert!(store.item("missing").await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn tags_may_repeat(store: InMemoryCatalogueStore) {
        let all = store.tags().await.expect("tags");
        assert_eq!(all.iter().filter(|tag| *tag == "red").count(), 2);
    }

    #[rstest]
    fn loads_wire_format_fixture() {
        let root = tempfile::tempdir().expect("temp dir");
        let body = serde_json::json!([{
            "id": "a0a4f044",
            "name": "Holy",
            "description": "Socks fit for a Messiah.",
            "imageUrl": ["/catalogue/images/holy_1.jpeg"],
            "price": 99.99,
            "count": 1,
            "tag": ["action", "magic"],
        }]);
        write_file(root.path(), "catalogue.json", body.to_string().as_bytes()).expect("write");

        let store = InMemoryCatalogueStore::from_json_file(&root.path().join("catalogue.json"))
            .expect("fixture loads");

        assert_eq!(store.len(), 1);
    }

    #[rstest]
    fn rejects_invalid_fixture() {
        let root = tempfile::tempdir().expect("temp dir");
        write_file(root.path(), "broken.json", br#"[{"id": ""}]"#).expect("write");

        let err = InMemoryCatalogueStore::from_json_file(&root.path().join("broken.json"))
            .expect_err("invalid fixture");

        assert!(matches!(err, FixtureLoadError::Parse { .. }));
    }

    #[rstest]
    fn missing_fixture_is_read_error() {
        let root = tempfile::tempdir().expect("temp dir");
        let err = InMemoryCatalogueStore::from_json_file(&root.path().join("absent.json"))
            .expect_err("missing fixture");
        assert!(matches!(err, FixtureLoadError::Read { .. }));
    }
}
