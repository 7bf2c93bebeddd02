//! Numis Storage
//!
//! `SQLite` database layer for Numis Admin.
//!
//! This crate provides persistent storage for coin records and administrator
//! accounts.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each feature owns its own queries and row mapping
//! - **JSON Columns**: Ordered price and image lists are stored as JSON text
//! - **Newest First**: Listings are ordered by creation time, descending
//!
//! # Example
//!
//! ```rust,no_run
//! use numis_storage::{LocalRecordStore, create_pool, run_migrations};
//! use numis_core::{CoinFilter, RecordStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create database connection
//! let pool = create_pool("sqlite://numis.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = LocalRecordStore::new(pool);
//!
//! // Get all coins
//! let coins = store.list_coins(CoinFilter::all()).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod coins;
pub mod users;

pub use context::LocalRecordStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://numis.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
