//! Daily selector
//!
//! Picks the record to post on a given calendar day. A record whose `date`
//! equals the day wins (first in file order); otherwise the day-of-year
//! cycles through the collection.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::error::{LinecastError, Result};
use crate::types::PostRecord;

/// Which rule picked the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SelectionRule {
    ExactDate,
    DayOfYear { ordinal: u32, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    pub record: &'a PostRecord,
    pub rule: SelectionRule,
}

/// Today's date on the host's local calendar
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Select the record to post on `today`
///
/// # Errors
///
/// Returns `LinecastError::ContentUnavailable` for an empty collection.
pub fn select(records: &[PostRecord], today: NaiveDate) -> Result<&PostRecord> {
    select_explained(records, today).map(|s| s.record)
}

/// Like [`select`], also reporting which rule fired
pub fn select_explained(records: &[PostRecord], today: NaiveDate) -> Result<Selection<'_>> {
    if records.is_empty() {
        return Err(LinecastError::ContentUnavailable(
            "the content collection is empty".to_string(),
        ));
    }

    let key = today.format("%Y-%m-%d").to_string();
    if let Some(record) = records.iter().find(|r| r.date.as_deref() == Some(key.as_str())) {
        return Ok(Selection {
            record,
            rule: SelectionRule::ExactDate,
        });
    }

    let ordinal = today.ordinal();
    let index = ordinal as usize % records.len();
    Ok(Selection {
        record: &records[index],
        rule: SelectionRule::DayOfYear { ordinal, index },
    })
}
