//! Output handling
//!
//! Tabular CSV export for both modes. The persisted sqlite store lives in
//! `storage`; this module only covers the flat file output.

mod csv_output;

pub use csv_output::{append_companies, write_company_header, write_reviews, COMPANY_COLUMNS};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
