//! Storage-specific error type wrapping sqlx errors.

use estore_domain::error::EstoreError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for EstoreError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Whether the failure is a `UNIQUE` constraint (or unique index) rejection.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// Name of the column a `UNIQUE` failure points at, if the driver said so.
///
/// `SQLite` reports these as `UNIQUE constraint failed: table.column`.
pub(crate) fn violated_column(err: &sqlx::Error) -> Option<String> {
    let db = err.as_database_error()?;
    let (_, target) = db.message().split_once(": ")?;
    let (_, column) = target.split_once('.')?;
    Some(column.trim().to_string())
}
