//! Company-directory search
//!
//! The secondary crawl mode: for each requested organization name, query
//! the source's company search and harvest the result listing entities.
//! Reuses the harvest engine's lookup discipline (every extraction is an
//! `Option`) against a much simpler entity shape. With a store attached
//! (the fleet-crawl variant), listings are deduplicated across runs on
//! their canonical URL.

use crate::harvest::extract::{normalized_text, select_first};
use crate::harvest::selectors;
use crate::output;
use crate::session::{self, FetchedPage};
use crate::storage::CompanyStore;
use crate::Result;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Company search endpoint, relative to the source's origin
const SEARCH_PATH: &str = "/Reviews/company-reviews.htm";

/// One harvested company-listing entity
///
/// The canonical URL is the persisted key; entities without one cannot be
/// stored. All other fields besides the searched name and rank may be
/// absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyListing {
    /// The name the sweep searched for
    pub searched_name: String,
    /// Canonical company locator (the PersistedKey)
    pub url: Option<String>,
    /// Display name on the listing
    pub name: Option<String>,
    /// Company's own website
    pub webpage: Option<String>,
    /// Headquarters location
    pub headquarters: Option<String>,
    /// Position in the search results, across the whole sweep
    pub search_rank: usize,
    /// Total review count as rendered (may carry separators)
    pub review_count: Option<String>,
}

impl CompanyListing {
    /// Placeholder entity for a search that failed outright
    pub fn placeholder(searched_name: &str, search_rank: usize) -> Self {
        Self {
            searched_name: searched_name.to_string(),
            url: None,
            name: None,
            webpage: None,
            headquarters: None,
            search_rank,
            review_count: None,
        }
    }

    /// CSV row in the fixed column order, absent fields as empty cells
    pub fn csv_row(&self) -> Vec<String> {
        vec![
            self.searched_name.clone(),
            self.url.clone().unwrap_or_default(),
            self.name.clone().unwrap_or_default(),
            self.webpage.clone().unwrap_or_default(),
            self.headquarters.clone().unwrap_or_default(),
            self.search_rank.to_string(),
            self.review_count.clone().unwrap_or_default(),
        ]
    }
}

/// Builds the search URL for one company name
pub fn search_url(origin: &Url, name: &str) -> Result<Url> {
    let mut url = origin.join(SEARCH_PATH)?;
    url.query_pairs_mut().append_pair("sc.keyword", name);
    Ok(url)
}

/// Parses up to `limit` listing modules from a search-results page
///
/// `rank_base` numbers the entities across the whole sweep, not per page.
pub fn parse_listings(
    doc: &Html,
    searched_name: &str,
    limit: usize,
    rank_base: usize,
) -> Vec<CompanyListing> {
    let selector = match Selector::parse(selectors::COMPANY_MODULE) {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };
    doc.select(&selector)
        .take(limit)
        .enumerate()
        .map(|(i, module)| parse_module(module, searched_name, rank_base + i))
        .collect()
}

fn parse_module(module: ElementRef<'_>, searched_name: &str, rank: usize) -> CompanyListing {
    let link = select_first(module, selectors::COMPANY_LINK);
    CompanyListing {
        searched_name: searched_name.to_string(),
        url: link
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string),
        name: link.map(normalized_text).filter(|s| !s.is_empty()),
        webpage: select_first(module, selectors::COMPANY_WEBPAGE)
            .map(|el| el.inner_html().trim().to_string())
            .filter(|s| !s.is_empty()),
        headquarters: select_first(module, selectors::COMPANY_HQ)
            .map(normalized_text)
            .filter(|s| !s.is_empty()),
        search_rank: rank,
        review_count: select_first(module, selectors::COMPANY_REVIEW_COUNT)
            .map(normalized_text)
            .filter(|s| !s.is_empty()),
    }
}

/// Parses a single company overview when the search redirected straight to
/// a company page
///
/// The hero block's employer id stands in as the canonical locator on this
/// page shape.
pub fn parse_company_overview(doc: &Html, searched_name: &str, rank: usize) -> CompanyListing {
    let root = doc.root_element();
    CompanyListing {
        searched_name: searched_name.to_string(),
        url: select_first(root, selectors::COMPANY_HERO)
            .and_then(|hero| hero.value().attr("data-employer-id"))
            .map(str::to_string),
        name: select_first(root, selectors::COMPANY_HEADER)
            .map(normalized_text)
            .filter(|s| !s.is_empty()),
        webpage: select_first(root, selectors::COMPANY_WEBSITE)
            .map(normalized_text)
            .filter(|s| !s.is_empty()),
        headquarters: select_first(root, selectors::COMPANY_PAGE_HQ)
            .map(normalized_text)
            .filter(|s| !s.is_empty()),
        search_rank: rank,
        review_count: select_first(root, selectors::COMPANY_REVIEW_COUNT)
            .map(normalized_text)
            .filter(|s| !s.is_empty()),
    }
}

/// Sweeps the directory for every requested name
///
/// Each company's entities are appended to the CSV (and, with a store
/// attached, dedup-inserted) before the next search starts, so a later
/// failure preserves everything already recorded. A search that fails
/// outright yields a placeholder row and the sweep continues.
pub async fn sweep(
    client: &Client,
    origin: &Url,
    names: &[String],
    limit: usize,
    mut store: Option<&mut CompanyStore>,
    output_path: &Path,
    delay: Duration,
) -> Result<Vec<CompanyListing>> {
    output::write_company_header(output_path)?;

    let mut all = Vec::new();
    let mut rank = 0;
    for (i, name) in names.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let listings = match search_one(client, origin, name, limit, rank).await {
            Ok(listings) => listings,
            Err(e) => {
                tracing::warn!("Search for {} failed: {}", name, e);
                vec![CompanyListing::placeholder(name, rank)]
            }
        };
        rank += listings.len();

        if let Some(store) = store.as_deref_mut() {
            let inserted = store.insert_all(&listings)?;
            for listing in &listings {
                store.upsert_overview(listing)?;
            }
            tracing::info!(
                "Stored {} new of {} listings for {}",
                inserted,
                listings.len(),
                name
            );
        }

        output::append_companies(output_path, &listings)?;
        all.extend(listings);
    }
    Ok(all)
}

async fn search_one(
    client: &Client,
    origin: &Url,
    name: &str,
    limit: usize,
    rank_base: usize,
) -> Result<Vec<CompanyListing>> {
    tracing::info!("Searching for company: {}", name);
    let url = search_url(origin, name)?;
    let page: FetchedPage = session::fetch_page(client, &url).await?;

    // A search with a single unambiguous hit gets redirected straight to
    // the company page, which carries no result modules.
    if page.url.as_str().contains("reviews") {
        Ok(parse_listings(&page.doc, name, limit, rank_base))
    } else {
        Ok(vec![parse_company_overview(&page.doc, name, rank_base)])
    }
}
