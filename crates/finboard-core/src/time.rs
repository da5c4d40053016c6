//! Date range selection for filtering transactions by calendar day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Range chosen in the date picker
///
/// Both bounds are inclusive. Without a `from` bound the range does not
/// filter at all, even when `to` is set. A `to` earlier than `from` matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included
    pub from: Option<NaiveDate>,
    /// Last day included (open-ended when absent)
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Create a closed range
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Create a range with no upper bound
    pub fn starting(from: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Whether the range restricts anything
    pub fn is_active(&self) -> bool {
        self.from.is_some()
    }

    /// Whether the bounds are inverted and nothing can match
    pub fn is_empty(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if to < from)
    }

    /// Check if a day falls within the range
    pub fn contains(&self, date: &NaiveDate) -> bool {
        match (self.from, self.to) {
            (None, _) => true,
            (Some(from), None) => *date >= from,
            (Some(from), Some(to)) => *date >= from && *date <= to,
        }
    }
}

/// Date filtering trait
pub trait DateFilter {
    /// Check if the item falls within the range
    fn filter_by_date(&self, range: &DateRange) -> bool;
}

impl DateFilter for super::Transaction {
    fn filter_by_date(&self, range: &DateRange) -> bool {
        range.contains(&self.date)
    }
}
