//! SQLite-backed company store
//!
//! The persistence/dedup layer of the fleet-crawl variant. Re-inserting a
//! key that is already stored is a silent no-op, so repeated runs against
//! the same source never duplicate rows.

use crate::directory::CompanyListing;
use crate::storage::schema::initialize_schema;
use crate::storage::StorageResult;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

/// Keyed store of company listings plus per-company overviews
pub struct CompanyStore {
    conn: Connection,
}

impl CompanyStore {
    /// Opens (or creates) a store at the given path
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Returns true iff the key is already stored
    pub fn exists(&self, key: &str) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM companies WHERE url = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Inserts every listing whose key is not already present
    ///
    /// Listings without a canonical URL cannot be keyed; they are logged
    /// and skipped. Returns the number of rows actually inserted.
    pub fn insert_all(&mut self, listings: &[CompanyListing]) -> StorageResult<usize> {
        let now = Utc::now().to_rfc3339();
        let mut inserted = 0;
        for listing in listings {
            let Some(key) = listing.url.as_deref() else {
                tracing::warn!(
                    "Skipping unkeyable listing for search '{}' (rank {})",
                    listing.searched_name,
                    listing.search_rank
                );
                continue;
            };
            inserted += self.conn.execute(
                "INSERT OR IGNORE INTO companies
                 (url, searched_name, name, webpage, headquarters, search_rank, review_count, first_seen_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    key,
                    listing.searched_name,
                    listing.name,
                    listing.webpage,
                    listing.headquarters,
                    listing.search_rank as i64,
                    listing.review_count,
                    now,
                ],
            )?;
        }
        Ok(inserted)
    }

    /// Writes the flat per-company overview row, replacing any previous one
    ///
    /// The overview table is a snapshot, not a dedup surface; every sweep
    /// refreshes it. Unkeyable listings are skipped.
    pub fn upsert_overview(&mut self, listing: &CompanyListing) -> StorageResult<()> {
        let Some(key) = listing.url.as_deref() else {
            return Ok(());
        };
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO company_overviews
             (company_url, name, webpage, headquarters, review_count, captured_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                key,
                listing.name,
                listing.webpage,
                listing.headquarters,
                listing.review_count,
                now,
            ],
        )?;
        Ok(())
    }

    /// Number of stored companies
    pub fn company_count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Number of stored overview rows
    pub fn overview_count(&self) -> StorageResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM company_overviews", [], |row| {
                    row.get(0)
                })?;
        Ok(count as u64)
    }
}
