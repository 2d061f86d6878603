//! Database schema definitions
//!
//! All SQL for the fleet-crawl store. The canonical company URL is the
//! primary key; membership in `companies` is the sole deduplication oracle
//! across runs.

/// SQL schema for the store
pub const SCHEMA_SQL: &str = r#"
-- Deduplicated company/listing metadata, keyed on the canonical locator
CREATE TABLE IF NOT EXISTS companies (
    url TEXT PRIMARY KEY,
    searched_name TEXT NOT NULL,
    name TEXT,
    webpage TEXT,
    headquarters TEXT,
    search_rank INTEGER NOT NULL,
    review_count TEXT,
    first_seen_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_companies_searched ON companies(searched_name);

-- Flat per-company overview, refreshed on every sweep
CREATE TABLE IF NOT EXISTS company_overviews (
    company_url TEXT PRIMARY KEY REFERENCES companies(url),
    name TEXT,
    webpage TEXT,
    headquarters TEXT,
    review_count TEXT,
    captured_at TEXT NOT NULL
);
"#;

/// Initializes the store schema
///
/// Safe to run on every open; everything is `IF NOT EXISTS`.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
