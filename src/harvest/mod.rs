//! The incremental harvesting engine
//!
//! This module contains the core of the system:
//! - per-field extraction rules and record assembly
//! - page harvesting with featured-entry exclusion
//! - the termination policy (limit, date bounds, empty page)
//! - pagination control
//! - the orchestrator that owns the crawl state and drives the loop

mod assemble;
pub(crate) mod extract;
mod orchestrator;
mod page;
mod pagination;
pub mod selectors;
mod termination;

pub use assemble::assemble;
pub use extract::{extract, split_sentiment};
pub use orchestrator::{navigate_to_listing, CrawlState, Orchestrator};
pub use page::{harvest_page, PageBatch};
pub use pagination::{current_page_number, has_next, next_page_url};
pub use termination::StopReason;
