//! Listing query: tag filter, sort order and page window.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use super::CatalogueItem;

/// Page number used when none (or an unusable one) is supplied.
pub const DEFAULT_PAGE_NUM: u32 = 1;
/// Page size used when none (or an unusable one) is supplied.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort keys accepted by the listing operation.
///
/// Every key breaks ties by identifier ascending, so listings are fully
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Price,
    Count,
}

impl SortKey {
    /// Parse a sort key leniently: matching is case-insensitive and unknown
    /// values fall back to [`SortKey::Id`].
    ///
    /// # Examples
    /// ```
    /// use catalogue::domain::SortKey;
    ///
    /// assert_eq!(SortKey::parse_lossy("PRICE"), SortKey::Price);
    /// assert_eq!(SortKey::parse_lossy("colour"), SortKey::Id);
    /// ```
    #[must_use]
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "name" => Self::Name,
            "price" => Self::Price,
            "count" => Self::Count,
            _ => Self::Id,
        }
    }

    /// Stable lowercase label used in logs and span attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
            Self::Count => "count",
        }
    }

    /// Compare two items under this key, breaking ties by identifier.
    #[must_use]
    pub fn compare(self, left: &CatalogueItem, right: &CatalogueItem) -> Ordering {
        let primary = match self {
            Self::Id => Ordering::Equal,
            Self::Name => left.name().cmp(right.name()),
            Self::Price => left.price().total_cmp(&right.price()),
            Self::Count => left.count().cmp(&right.count()),
        };
        primary.then_with(|| left.id().cmp(right.id()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a catalogue listing.
///
/// ## Invariants
/// - `page_num >= 1` and `page_size >= 1`; zero inputs are replaced by the
///   defaults at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    tags: BTreeSet<String>,
    order: SortKey,
    page_num: u32,
    page_size: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            tags: BTreeSet::new(),
            order: SortKey::Id,
            page_num: DEFAULT_PAGE_NUM,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Build a query, substituting defaults for zero page parameters.
    ///
    /// # Examples
    /// ```
    /// use catalogue::domain::{ListQuery, SortKey};
    ///
    /// let query = ListQuery::new(Default::default(), SortKey::Name, 0, 5);
    /// assert_eq!(query.page_num(), 1);
    /// assert_eq!(query.page_size(), 5);
    /// ```
    #[must_use]
    pub fn new(tags: BTreeSet<String>, order: SortKey, page_num: u32, page_size: u32) -> Self {
        Self {
            tags,
            order,
            page_num: if page_num == 0 {
                DEFAULT_PAGE_NUM
            } else {
                page_num
            },
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    /// Tags an item must intersect; empty matches everything.
    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Sort key applied before paging.
    #[must_use]
    pub fn order(&self) -> SortKey {
        self.order
    }

    /// One-based page number.
    #[must_use]
    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    /// Items per page, never zero.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Sort `items` and cut out the requested page.
    ///
    /// Pages past the end yield an empty vector.
    #[must_use]
    pub fn apply(&self, mut items: Vec<CatalogueItem>) -> Vec<CatalogueItem> {
        items.sort_by(|left, right| self.order.compare(left, right));
        let size = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        let skipped_pages = usize::try_from(self.page_num - 1).unwrap_or(usize::MAX);
        let offset = skipped_pages.saturating_mul(size);
        items.into_iter().skip(offset).take(size).collect()
    }
}
