//! Termination policy
//!
//! Evaluated after every page. Decides whether the traversal must stop
//! based on the freshly harvested batch, the cumulative emitted count, and
//! the optional date bound.

use crate::config::DateBound;
use crate::harvest::page::PageBatch;
use crate::schema::Field;
use chrono::NaiveDate;
use std::fmt;

/// Why the traversal stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page yielded zero candidate nodes
    SourceExhausted,
    /// The batch crossed the configured min/max date bound
    DateBoundCrossed,
    /// The emitted-record count reached the configured limit
    LimitReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceExhausted => write!(f, "source exhausted"),
            Self::DateBoundCrossed => write!(f, "date limit reached"),
            Self::LimitReached => write!(f, "record limit reached"),
        }
    }
}

/// Evaluates the termination rules, in order
///
/// `emitted` is the cumulative count *after* appending this batch. The
/// limit rule keeps the source tool's boundary: the run stops once one more
/// record would reach the limit.
pub fn evaluate(
    batch: &PageBatch,
    emitted: usize,
    limit: usize,
    bound: Option<&DateBound>,
) -> Option<StopReason> {
    if batch.candidates == 0 {
        return Some(StopReason::SourceExhausted);
    }

    if let Some(bound) = bound {
        let dates = batch_dates(batch);
        match bound {
            // Meaningful only on a listing sorted ascending by date.
            DateBound::Max(max) => {
                if let Some(newest) = dates.iter().max() {
                    if newest > max {
                        return Some(StopReason::DateBoundCrossed);
                    }
                }
            }
            // Meaningful only on a listing sorted descending by date.
            DateBound::Min(min) => {
                if let Some(oldest) = dates.iter().min() {
                    if oldest < min {
                        return Some(StopReason::DateBoundCrossed);
                    }
                }
            }
        }
    }

    if emitted + 1 >= limit {
        return Some(StopReason::LimitReached);
    }

    None
}

/// Publication dates of the batch, unparseable values skipped
fn batch_dates(batch: &PageBatch) -> Vec<NaiveDate> {
    batch
        .records
        .iter()
        .filter_map(|record| record.get(Field::Date))
        .filter_map(parse_record_date)
        .collect()
}

/// Parses a harvested date value
///
/// Values arrive either as plain dates or as full timestamps; only the
/// leading calendar date matters for the bound comparison.
pub(crate) fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
