//! CSS selectors for the source's review markup
//!
//! Every class name the extraction rules depend on lives here. When the
//! source ships a redesign, this is the file that changes.

/// One review entry in the listing
pub const REVIEW: &str = ".empReview";

/// Author sub-node carrying status/title/location
pub const AUTHOR_INFO: &str = ".authorInfo";

/// Marker on sponsored entries; flagged entries are never harvested
pub const FEATURED_FLAG: &str = ".featuredFlag";

/// Composite "Status - Job Title" node inside the author block
pub const AUTHOR_JOB_TITLE: &str = ".authorJobTitle";

/// Author location node
pub const AUTHOR_LOCATION: &str = ".authorLocation";

/// Review headline
pub const SUMMARY: &str = ".summary";

/// Tenure sentence
pub const MAIN_TEXT: &str = ".mainText";

/// Helpful-vote node, e.g. `Helpful (12)`
pub const HELPFUL_COUNT: &str = ".helpfulCount";

/// Shared block class for pros / cons / advice, in that document order
pub const DETAIL_BLOCK: &str = ".v2__EIReviewDetailsV2__fullWidth";

/// Truncation affordance inside a detail block
pub const CONTINUE_READING: &str = ".v2__EIReviewDetailsV2__continueReading";

/// Star-rating container
pub const RATING_BLOCK: &str = ".gdStars";

/// Overall rating value node; the rating lives in its `title` attribute
pub const RATING_VALUE: &str = ".rating .value-title";

/// Sub-rating list items, fixed order: work-life balance, culture & values,
/// career opportunities, compensation & benefits, senior management
pub const SUB_RATING_ITEMS: &str = ".subRatings ul li";

/// Bar node inside one sub-rating item; the value is its `title` attribute
pub const SUB_RATING_BAR: &str = ".gdBars";

/// Composite recommendation / outlook / CEO-approval block
pub const SENTIMENT_BLOCK: &str = ".recommends";

/// Next-page affordance in the paging control
pub const PAGINATION_NEXT: &str = ".pagination__PaginationStyle__next";

/// Anchor inside the next-page affordance
pub const PAGINATION_NEXT_LINK: &str = ".pagination__PaginationStyle__next a[href]";

/// Current-page marker inside the paging control
pub const PAGING_CURRENT: &str = ".pagingControls li.current span.disabled";

/// Reviews tab on an organization's landing page
pub const REVIEWS_NAV_LINK: &str = r#"a[data-label="Reviews"][href]"#;

// ===== Company directory =====

/// One company module on a search-results page
pub const COMPANY_MODULE: &str = ".eiHdrModule";

/// Company name/URL anchor inside a module
pub const COMPANY_LINK: &str = ".tightAll";

/// Company website node inside a module
pub const COMPANY_WEBPAGE: &str = ".url";

/// First headquarters span inside a module
pub const COMPANY_HQ: &str = ".hqInfo.adr span";

/// Review-count node inside a module
pub const COMPANY_REVIEW_COUNT: &str = ".eiCell.cell.reviews .num";

/// Hero block on a single company page (employer id attribute)
pub const COMPANY_HERO: &str = "#EmpHero";

/// Company name heading on a single company page
pub const COMPANY_HEADER: &str = ".header h1";

/// Website node on a single company page
pub const COMPANY_WEBSITE: &str = ".website";

/// Headquarters entity on a single company page
pub const COMPANY_PAGE_HQ: &str = "div.infoEntity:nth-child(2) > span:nth-child(2)";
