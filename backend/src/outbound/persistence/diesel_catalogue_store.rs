//! PostgreSQL-backed `CatalogueStore` adapter.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel_async::RunQueryDsl;

use super::diesel_helpers::{collect_rows, map_diesel_error};
use super::models::{CatalogueItemRow, TagRow};
use super::pool::DbPool;
use super::schema::catalogue_items;
use crate::domain::CatalogueItem;
use crate::domain::ports::{CatalogueStore, CatalogueStoreError};

const TAGS_SQL: &str = "SELECT DISTINCT unnest(tags) AS tag FROM catalogue_items";

/// Diesel-backed catalogue store.
///
/// Tag filtering uses the array overlap operator (`tags && $1`). Ordering and
/// paging are left to the domain.
#[derive(Clone)]
pub struct DieselCatalogueStore {
    pool: DbPool,
}

impl DieselCatalogueStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogueStore for DieselCatalogueStore {
    async fn items(
        &self,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<CatalogueItem>, CatalogueStoreError> {
        let mut conn = self.pool.get().await?;
        let mut query = catalogue_items::table
            .select(CatalogueItemRow::as_select())
            .into_boxed();
        if !tags.is_empty() {
            let wanted: Vec<String> = tags.iter().cloned().collect();
            query = query.filter(catalogue_items::tags.overlaps_with(wanted));
        }
        let rows: Vec<CatalogueItemRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        collect_rows(rows.into_iter().map(CatalogueItem::try_from))
    }

    async fn item(&self, id: &str) -> Result<Option<CatalogueItem>, CatalogueStoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<CatalogueItemRow> = catalogue_items::table
            .filter(catalogue_items::id.eq(id))
            .select(CatalogueItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(CatalogueItem::try_from)
            .transpose()
            .map_err(CatalogueStoreError::query)
    }

    async fn tags(&self) -> Result<Vec<String>, CatalogueStoreError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<TagRow> = sql_query(TAGS_SQL)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(|row| row.tag).collect())
    }

    async fn ping(&self) -> Result<(), CatalogueStoreError> {
        let mut conn = self.pool.get().await?;
        sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
