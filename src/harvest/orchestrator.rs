//! Harvest orchestration
//!
//! Owns the browsing session and the crawl state and drives the loop:
//! harvest the current page, append, evaluate the termination policy, and
//! advance. Navigation failures are fatal to the run; there is no retry at
//! this layer.

use crate::config::DateBound;
use crate::harvest::page::harvest_page;
use crate::harvest::selectors;
use crate::harvest::{pagination, termination};
use crate::schema::Record;
use crate::session::{self, FetchedPage};
use crate::{GleanError, Result};
use reqwest::Client;
use scraper::Selector;
use url::Url;

/// Run-scoped mutable crawl state
///
/// Owned exclusively by the orchestrator. The termination flag is
/// monotonic: once set it is never cleared. The page index increases by
/// exactly one per successful advance.
#[derive(Debug, Clone)]
pub struct CrawlState {
    page: u32,
    emitted: usize,
    date_bound: Option<DateBound>,
    terminated: bool,
}

impl CrawlState {
    pub fn new(date_bound: Option<DateBound>) -> Self {
        Self {
            page: 1,
            emitted: 0,
            date_bound,
            terminated: false,
        }
    }

    /// Current 1-based page index
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Cumulative emitted-record count
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn date_bound(&self) -> Option<&DateBound> {
        self.date_bound.as_ref()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Sets the termination flag; there is deliberately no way back
    pub fn terminate(&mut self) {
        self.terminated = true;
    }

    fn advance_page(&mut self) {
        self.page += 1;
    }

    fn start_at_page(&mut self, page: u32) {
        self.page = page;
    }

    fn set_emitted(&mut self, emitted: usize) {
        self.emitted = emitted;
    }
}

/// Drives a review harvest over a paginated listing
pub struct Orchestrator {
    client: Client,
    listing_url: Url,
    limit: usize,
    state: CrawlState,
}

impl Orchestrator {
    /// Creates an orchestrator positioned on a listing URL
    ///
    /// The client is expected to carry a signed-in session.
    pub fn new(client: Client, listing_url: Url, limit: usize, date_bound: Option<DateBound>) -> Self {
        Self {
            client,
            listing_url,
            limit,
            state: CrawlState::new(date_bound),
        }
    }

    /// Read access to the crawl state, mainly for reporting
    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Runs the harvest to completion and returns the emitted records
    ///
    /// Stops when the termination policy fires or the listing runs out of
    /// pages. A navigation failure mid-run aborts with whatever error the
    /// session layer produced; already-harvested records are dropped with
    /// it, matching the all-at-end output discipline of review mode.
    pub async fn run(&mut self) -> Result<Vec<Record>> {
        let mut page = session::fetch_page(&self.client, &self.listing_url).await?;

        // A mid-listing start: trust the paging control over our counter.
        if let Some(number) = pagination::current_page_number(&page.doc) {
            self.state.start_at_page(number);
        }
        tracing::info!("Starting from page {}", self.state.page());

        let mut records = Vec::new();
        loop {
            tracing::info!("Extracting reviews from page {}", self.state.page());
            let batch = harvest_page(&page.doc)?;
            tracing::info!(
                "Found {} reviews on page {}",
                batch.candidates,
                self.state.page()
            );

            let emitted_after = records.len() + batch.records.len();
            let stop = termination::evaluate(
                &batch,
                emitted_after,
                self.limit,
                self.state.date_bound(),
            );
            records.extend(batch.records);
            self.state.set_emitted(records.len());

            if let Some(reason) = stop {
                tracing::info!("Ending harvest: {}", reason);
                self.state.terminate();
                break;
            }

            if pagination::has_next(&page.doc) {
                page = self.advance(&page).await?;
            } else {
                tracing::info!("No further pages in the listing");
                break;
            }
        }

        tracing::info!(
            "Harvest finished with {} records after page {}",
            records.len(),
            self.state.page()
        );
        Ok(records)
    }

    /// Advances to the next page
    ///
    /// Calling this without a next-page affordance is a contract violation
    /// and fails with `NoNextPage`; a fetch failure surfaces as a fatal
    /// navigation error.
    async fn advance(&mut self, current: &FetchedPage) -> Result<FetchedPage> {
        let next = pagination::next_page_url(&current.doc, &current.url).ok_or(
            GleanError::NoNextPage {
                page: self.state.page(),
            },
        )?;
        tracing::info!("Going to page {}", self.state.page() + 1);
        let fetched = session::fetch_page(&self.client, &next).await?;
        self.state.advance_page();
        Ok(fetched)
    }
}

/// Resolves an organization landing page to its review listing URL
///
/// Follows the `Reviews` navigation affordance. Used when the run does not
/// start from a listing URL directly.
pub async fn navigate_to_listing(client: &Client, landing: &Url) -> Result<Url> {
    tracing::info!("Navigating to the review listing");
    let page = session::fetch_page(client, landing).await?;

    let selector = Selector::parse(selectors::REVIEWS_NAV_LINK).map_err(|_| {
        GleanError::ListingNotFound {
            url: landing.to_string(),
        }
    })?;
    page.doc
        .select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| page.url.join(href).ok())
        .ok_or_else(|| GleanError::ListingNotFound {
            url: landing.to_string(),
        })
}
