/// Storage-specific errors
use thiserror::Error;
use tunebox_core::CoreError;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::storage(err.to_string())
    }
}

/// Classify a failed write by the constraint it tripped.
///
/// Unique violations become whatever `on_unique` builds (usually a
/// `Conflict`), foreign-key violations whatever `on_foreign_key` builds
/// (usually a `NotFound`); anything else is a storage fault.
pub(crate) fn classify_write_error(
    err: sqlx::Error,
    on_unique: impl FnOnce() -> CoreError,
    on_foreign_key: impl FnOnce() -> CoreError,
) -> CoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_foreign_key_violation() {
            return on_foreign_key();
        }
    }
    CoreError::from(err)
}

/// Convert stored unix milliseconds back into a timestamp
pub(crate) fn timestamp_from_millis(
    millis: i64,
) -> tunebox_core::Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| CoreError::storage(format!("Invalid timestamp: {}", millis)))
}
