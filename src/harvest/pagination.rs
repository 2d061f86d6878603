//! Pagination control
//!
//! Detects the next-page affordance on the current page and resolves its
//! target. Advancing is the orchestrator's job; these helpers only answer
//! "is there a next page, and where does it go".

use crate::harvest::selectors;
use scraper::{Html, Selector};
use url::Url;

/// Returns true when the page carries a next-page affordance with a link
pub fn has_next(doc: &Html) -> bool {
    next_href(doc).is_some()
}

/// Resolves the next page's URL against the current one
///
/// Returns `None` when the affordance is missing, link-less (the source
/// renders a disabled "next" on the last page), or malformed.
pub fn next_page_url(doc: &Html, current: &Url) -> Option<Url> {
    let href = next_href(doc)?;
    current.join(&href).ok()
}

fn next_href(doc: &Html) -> Option<String> {
    let selector = Selector::parse(selectors::PAGINATION_NEXT_LINK).ok()?;
    doc.select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Reads the current page number from the paging control
///
/// Used when a run starts from a mid-listing URL. Thousands separators are
/// stripped before parsing.
pub fn current_page_number(doc: &Html) -> Option<u32> {
    let selector = Selector::parse(selectors::PAGING_CURRENT).ok()?;
    let marker = doc.select(&selector).next()?;
    let text: String = marker.text().collect();
    text.trim().replace(',', "").parse().ok()
}
