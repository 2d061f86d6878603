use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Complete configuration for one harvest run
///
/// Built from the command line and validated before any navigation occurs.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Organization landing page, or the listing itself with
    /// `start_from_listing`
    pub start_url: Url,

    /// Output CSV path
    pub output_path: PathBuf,

    /// Maximum number of records to harvest
    pub limit: usize,

    /// Optional date bound; only valid when starting from a listing URL
    pub date_bound: Option<DateBound>,

    /// Treat `start_url` as an already-paginated, already-sorted listing
    pub start_from_listing: bool,

    /// Review harvesting or company-directory search
    pub mode: Mode,

    /// Company names to search in directory mode
    pub search_names: Vec<String>,

    /// SQLite store path; enables deduplicated persistence across runs
    /// (directory mode)
    pub store_path: Option<PathBuf>,

    /// Pause between successive company searches
    pub search_delay: Duration,

    /// Sign-in credentials
    pub credentials: Credentials,
}

/// Harvest mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Reviews,
    Companies,
}

/// A min or max publication-date bound
///
/// One enum value, so configuring both at once is unrepresentable past
/// validation. `Min` requires the listing sorted descending by date,
/// `Max` requires ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Min(NaiveDate),
    Max(NaiveDate),
}

/// Sign-in credentials
///
/// Deserializes from the structured JSON payload
/// (`{"username": ..., "password": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
