//! Gleaner: an incremental employer-review harvester
//!
//! This crate walks a paginated review listing for a target organization,
//! normalizes every review into a fixed 19-field schema, and exports the
//! accumulated sequence as CSV. A secondary mode sweeps the source's company
//! directory and can persist deduplicated listings across runs.

pub mod config;
pub mod directory;
pub mod harvest;
pub mod output;
pub mod schema;
pub mod session;
pub mod storage;

use thiserror::Error;

/// Main error type for Gleaner operations
#[derive(Debug, Error)]
pub enum GleanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation failure for {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Sign-in failed for {username}: {message}")]
    SignIn { username: String, message: String },

    #[error("No next page to advance to from page {page}")]
    NoNextPage { page: u32 },

    #[error("Assembled record does not match the schema: {0}")]
    SchemaDrift(String),

    #[error("Review listing not found on landing page {url}")]
    ListingNotFound { url: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// Every variant is raised before any navigation occurs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid argument combination: no starting listing URL passed, but a min/max date bound was specified")]
    DateBoundWithoutListing,

    #[error("Invalid argument combination: both min_date and max_date specified")]
    ConflictingDateBounds,

    #[error("min_date requires the listing to be sorted DESCENDING by date")]
    MinDateRequiresDescending,

    #[error("max_date requires the listing to be sorted ASCENDING by date")]
    MaxDateRequiresAscending,

    #[error(
        "Please provide sign-in credentials: either --username/--password, \
         a --credentials JSON file, or a secret.json in the working directory"
    )]
    MissingCredentials,

    #[error("Company search mode requires at least one --search-names entry")]
    NoSearchNames,

    #[error("Failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse credentials file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Gleaner operations
pub type Result<T> = std::result::Result<T, GleanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Credentials, DateBound, HarvestConfig, Mode};
pub use harvest::{CrawlState, Orchestrator};
pub use schema::{Field, Record};
