//! Tunebox Storage
//!
//! `SQLite` implementation of the Library Store.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: songs, playlists and favorites each own their queries
//! - **Schema-level guarantees**: a song appears at most once per playlist and a
//!   user has at most one active favorite per song; both are enforced by the
//!   schema and surface as `Conflict`
//! - **No policy**: ownership checks and multi-record workflows belong to the
//!   consistency engine in `tunebox-library`
//!
//! # Example
//!
//! ```rust,no_run
//! use tunebox_storage::{SqliteLibraryStore, create_pool, run_migrations};
//! use tunebox_core::LibraryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://tunebox.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteLibraryStore::new(pool);
//! let songs = store.list_songs().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod favorites;
pub mod playlists;
pub mod songs;

pub use context::SqliteLibraryStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://tunebox.db`)
///
/// In-memory databases get a single connection, since every connection to
/// `:memory:` would otherwise see its own empty database.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .connect_with(options)
        .await?;

    tracing::info!(url = %database_url, "SQLite pool ready");

    Ok(pool)
}

/// Create a pool and bring its schema up to date
pub async fn connect(database_url: &str) -> Result<SqliteLibraryStore, StorageError> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(SqliteLibraryStore::new(pool))
}
