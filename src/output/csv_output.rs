//! CSV export
//!
//! Review records are written in one pass at run end, schema columns in
//! order, absent fields as empty cells. Company listings are appended
//! per search so earlier results survive a later failure.

use crate::directory::CompanyListing;
use crate::output::OutputResult;
use crate::schema::{Field, Record};
use std::fs::OpenOptions;
use std::path::Path;

/// Column order of the company-listing export
pub const COMPANY_COLUMNS: [&str; 7] = [
    "company_name_to_search",
    "company_url",
    "company_name",
    "company_webpage",
    "company_HQ",
    "search_rank",
    "n_reviews",
];

/// Writes the full review sequence to `path`, header included
pub fn write_reviews(path: &Path, records: &[Record]) -> OutputResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(Field::ALL.iter().map(|f| f.column_name()))?;
    for record in records {
        writer.write_record(record.csv_row())?;
    }
    writer.flush()?;
    Ok(())
}

/// Starts a fresh company-listing export with just the header row
pub fn write_company_header(path: &Path) -> OutputResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COMPANY_COLUMNS)?;
    writer.flush()?;
    Ok(())
}

/// Appends listing rows to an export started by `write_company_header`
pub fn append_companies(path: &Path, listings: &[CompanyListing]) -> OutputResult<()> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for listing in listings {
        writer.write_record(listing.csv_row())?;
    }
    writer.flush()?;
    Ok(())
}
