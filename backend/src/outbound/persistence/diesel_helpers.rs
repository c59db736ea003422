//! Error mapping shared by Diesel store adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::CatalogueStoreError;

/// Map Diesel errors to store errors, logging the raw cause at debug level.
pub fn map_diesel_error(error: DieselError) -> CatalogueStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CatalogueStoreError::connection("database connection closed")
        }
        DieselError::DatabaseError(_, info) => CatalogueStoreError::query(info.message()),
        DieselError::QueryBuilderError(_) => CatalogueStoreError::query("database query error"),
        other => CatalogueStoreError::query(other.to_string()),
    }
}

/// Collect converted rows, failing on the first conversion error.
pub fn collect_rows<T, I>(rows: I) -> Result<Vec<T>, CatalogueStoreError>
where
    I: IntoIterator<Item = Result<T, String>>,
{
    rows.into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(CatalogueStoreError::query)
}
