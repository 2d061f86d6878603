//! Record assembly
//!
//! Applies every field rule to one review node and asserts the result's key
//! set exactly matches the schema. A mismatch means the schema and the rule
//! table have drifted apart, which is a bug, not recoverable data.

use crate::harvest::extract::extract;
use crate::harvest::selectors;
use crate::schema::{Field, Record};
use crate::{GleanError, Result};
use scraper::{ElementRef, Selector};
use std::collections::BTreeMap;

/// Assembles one record from a review node
pub fn assemble(review: ElementRef<'_>) -> Result<Record> {
    let author = author_node(review);

    let mut values = BTreeMap::new();
    for field in Field::ALL {
        values.insert(field, extract(field, review, author));
    }

    Record::from_values(values).map_err(GleanError::SchemaDrift)
}

/// Locates the author sub-node of a review, if present
///
/// Author-scoped rules (title, location, status) resolve to absence when it
/// is missing.
fn author_node(review: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let selector = Selector::parse(selectors::AUTHOR_INFO).ok()?;
    review.select(&selector).next()
}
