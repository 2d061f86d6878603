//! Persistence/dedup layer
//!
//! SQLite-backed store used by the fleet-crawl variant. Keyed on the
//! canonical company URL; re-insertion of a present key is a no-op by
//! design, never an error.

mod schema;
mod sqlite;

pub use schema::initialize_schema;
pub use sqlite::CompanyStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
