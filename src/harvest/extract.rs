//! Field extraction rules
//!
//! One rule per schema field. A rule takes the review node (and, for
//! author-scoped fields, the author sub-node) and returns a value or `None`.
//! Lookup failures never escalate past the rule: absence is data here, not
//! an error path. The helpful-vote count is the one asymmetric field: it
//! defaults to `0` instead of the absence sentinel.

use crate::harvest::selectors;
use crate::schema::Field;
use scraper::{ElementRef, Selector};

/// Applies the rule for `field` to one review node
///
/// The `match` is exhaustive over the schema, so a field added to the enum
/// without a rule fails to compile rather than drifting silently.
pub fn extract(
    field: Field,
    review: ElementRef<'_>,
    author: Option<ElementRef<'_>>,
) -> Option<String> {
    match field {
        Field::Date => date(review),
        Field::EmployeeTitle => employee_title(review, author),
        Field::Location => location(review, author),
        Field::Status => status(author),
        Field::ReviewTitle => quoted_text(review, selectors::SUMMARY),
        Field::Tenure => quoted_text(review, selectors::MAIN_TEXT),
        Field::HelpfulCount => Some(helpful_count(review).to_string()),
        Field::Pros => detail_section(review, 0, "Pros"),
        Field::Cons => detail_section(review, 1, "Cons"),
        Field::Advice => detail_section(review, 2, "Advice to Management"),
        Field::RatingOverall => overall_rating(review),
        Field::RatingWorkLife => sub_rating(review, 0),
        Field::RatingCulture => sub_rating(review, 1),
        Field::RatingCareer => sub_rating(review, 2),
        Field::RatingComp => sub_rating(review, 3),
        Field::RatingManagement => sub_rating(review, 4),
        Field::Recommends => sentiment(review).0,
        Field::Outlook => sentiment(review).1,
        Field::CeoApproval => sentiment(review).2,
    }
}

// ===== Document-tree lookup helpers =====
//
// Every lookup returns an Option; a selector that fails to parse behaves
// like a selector that matches nothing.

pub(crate) fn select_first<'a>(el: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    el.select(&selector).next()
}

pub(crate) fn select_nth<'a>(el: ElementRef<'a>, css: &str, n: usize) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    el.select(&selector).nth(n)
}

/// Whitespace-normalized text content of a node and its descendants
pub(crate) fn normalized_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of each direct child element, one entry per child
///
/// A node with no element children contributes its own text as a single
/// line. This reproduces line-per-block rendering for composite nodes.
pub(crate) fn block_lines(el: ElementRef<'_>) -> Vec<String> {
    let mut lines: Vec<String> = el
        .children()
        .filter_map(ElementRef::wrap)
        .map(normalized_text)
        .filter(|s| !s.is_empty())
        .collect();
    if lines.is_empty() {
        let text = normalized_text(el);
        if !text.is_empty() {
            lines.push(text);
        }
    }
    lines
}

// ===== Per-field rules =====

fn date(review: ElementRef<'_>) -> Option<String> {
    select_first(review, "time")
        .and_then(|t| t.value().attr("datetime"))
        .map(str::to_string)
}

fn employee_title(review: ElementRef<'_>, author: Option<ElementRef<'_>>) -> Option<String> {
    // "Anonymous Employee" suppresses title extraction entirely; there is
    // no title component to split out.
    if normalized_text(review).contains("Anonymous Employee") {
        return None;
    }
    let title = author
        .and_then(|a| select_first(a, selectors::AUTHOR_JOB_TITLE))
        .map(normalized_text)
        .and_then(|text| text.split('-').nth(1).map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty());
    if title.is_none() {
        tracing::warn!("Failed to extract employee_title");
    }
    title
}

fn location(review: ElementRef<'_>, author: Option<ElementRef<'_>>) -> Option<String> {
    // Location is only rendered as "... in City, ST"; skip the lookup when
    // the marker is missing.
    if !normalized_text(review).contains(" in ") {
        return None;
    }
    author
        .and_then(|a| select_first(a, selectors::AUTHOR_LOCATION))
        .map(normalized_text)
        .filter(|s| !s.is_empty())
}

fn status(author: Option<ElementRef<'_>>) -> Option<String> {
    let status = author
        .map(normalized_text)
        .and_then(|text| text.split('-').next().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty());
    if status.is_none() {
        tracing::warn!("Failed to extract employee_status");
    }
    status
}

/// Text of the first match with surrounding quote characters trimmed
fn quoted_text(review: ElementRef<'_>, css: &str) -> Option<String> {
    select_first(review, css).map(|el| normalized_text(el).trim_matches('"').to_string())
}

/// Helpful-vote count: the integer inside the trailing parenthetical
///
/// Absence or parse failure yields 0, not the absence sentinel.
fn helpful_count(review: ElementRef<'_>) -> u32 {
    let text = match select_first(review, selectors::HELPFUL_COUNT) {
        Some(el) => normalized_text(el).replace('"', ""),
        None => return 0,
    };
    let open = match text.find('(') {
        Some(i) => i,
        None => return 0,
    };
    text[open + 1..]
        .split(')')
        .next()
        .map(|inner| inner.replace(',', ""))
        .and_then(|digits| digits.trim().parse().ok())
        .unwrap_or(0)
}

/// Pros / cons / advice: occurrence `index` of the shared detail-block class
///
/// The truncation affordance's caption is removed from the captured text
/// (best-effort; a block without one is read as-is), then the block's own
/// leading label is stripped.
fn detail_section(review: ElementRef<'_>, index: usize, label: &str) -> Option<String> {
    let block = select_nth(review, selectors::DETAIL_BLOCK, index)?;
    let mut text = normalized_text(block);
    if let Some(affordance) = select_first(block, selectors::CONTINUE_READING) {
        let caption = normalized_text(affordance);
        if !caption.is_empty() {
            text = text.replacen(&caption, "", 1);
        }
    }
    let body = match text.trim().strip_prefix(label) {
        Some(rest) => rest.to_string(),
        None => text.replacen(label, "", 1),
    };
    Some(body.trim().to_string())
}

fn overall_rating(review: ElementRef<'_>) -> Option<String> {
    select_first(review, selectors::RATING_BLOCK)
        .and_then(|block| select_first(block, selectors::RATING_VALUE))
        .and_then(|value| value.value().attr("title"))
        .map(str::to_string)
}

/// Sub-rating `i` (0..4): the title attribute of the i-th list item's bar
///
/// A missing item yields absence for that sub-rating only.
fn sub_rating(review: ElementRef<'_>, i: usize) -> Option<String> {
    select_first(review, selectors::RATING_BLOCK)
        .and_then(|block| select_nth(block, selectors::SUB_RATING_ITEMS, i))
        .and_then(|item| select_first(item, selectors::SUB_RATING_BAR))
        .and_then(|bar| bar.value().attr("title"))
        .map(str::to_string)
}

fn sentiment(review: ElementRef<'_>) -> (Option<String>, Option<String>, Option<String>) {
    match select_first(review, selectors::SENTIMENT_BLOCK) {
        Some(block) => split_sentiment(&block_lines(block)),
        None => (None, None, None),
    }
}

/// Splits the composite sentiment block into
/// (recommendation, outlook, CEO-approval)
///
/// | lines | recommend | outlook                      | CEO-approval          |
/// |-------|-----------|------------------------------|-----------------------|
/// | 1     | line 0    | absent                       | absent                |
/// | 2     | line 0    | line 1 unless it says "CEO"  | line 1 if it says "CEO" |
/// | 3     | line 0    | line 1 unless it says "CEO"  | line 2                |
/// | 0     | absent    | absent                       | absent                |
///
/// The "CEO" substring check is the sole disambiguator for 2-line blocks.
/// It is a heuristic: an outlook line that merely mentions "CEO" is
/// misclassified, and that behavior is kept deliberately.
pub fn split_sentiment(lines: &[String]) -> (Option<String>, Option<String>, Option<String>) {
    if lines.is_empty() {
        return (None, None, None);
    }
    let recommend = Some(lines[0].clone());
    let outlook = match lines.len() {
        2 | 3 if !lines[1].contains("CEO") => Some(lines[1].clone()),
        _ => None,
    };
    let ceo = match lines.len() {
        3 => Some(lines[2].clone()),
        2 if lines[1].contains("CEO") => Some(lines[1].clone()),
        _ => None,
    };
    (recommend, outlook, ceo)
}
