//! Page harvesting
//!
//! Enumerates review candidates on the current page in document order,
//! drops featured/promoted entries, and assembles the rest. The candidate
//! count (featured included) feeds the termination policy's empty-page rule.

use crate::harvest::assemble::assemble;
use crate::harvest::selectors;
use crate::schema::Record;
use crate::Result;
use scraper::{ElementRef, Html, Selector};

/// Records harvested from one page
#[derive(Debug, Clone)]
pub struct PageBatch {
    /// Assembled non-featured records, in document order
    pub records: Vec<Record>,
    /// Number of candidate nodes found, featured entries included
    pub candidates: usize,
}

/// Harvests every non-featured review on the page
pub fn harvest_page(doc: &Html) -> Result<PageBatch> {
    let candidates = review_nodes(doc);
    let mut records = Vec::with_capacity(candidates.len());

    for review in &candidates {
        if is_featured(*review) {
            tracing::info!("Discarding a featured review");
            continue;
        }
        let record = assemble(*review)?;
        tracing::info!(
            "Harvested \"{}\" ({})",
            record.get(crate::schema::Field::ReviewTitle).unwrap_or(""),
            record.get(crate::schema::Field::Date).unwrap_or("")
        );
        records.push(record);
    }

    Ok(PageBatch {
        records,
        candidates: candidates.len(),
    })
}

fn review_nodes(doc: &Html) -> Vec<ElementRef<'_>> {
    match Selector::parse(selectors::REVIEW) {
        Ok(selector) => doc.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn is_featured(review: ElementRef<'_>) -> bool {
    match Selector::parse(selectors::FEATURED_FLAG) {
        Ok(selector) => review.select(&selector).next().is_some(),
        Err(_) => false,
    }
}
