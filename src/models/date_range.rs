//! Inclusive calendar date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Counts the days from `start` to `end`, inclusive of both endpoints.
///
/// An inverted range (`end < start`) counts as zero days rather than an
/// error; submission validation is what rejects it.
///
/// # Example
///
/// ```
/// use leave_engine::models::total_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
/// assert_eq!(total_days(start, end), 7);
/// assert_eq!(total_days(end, start), 0);
/// ```
pub fn total_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let days = (end - start).num_days() + 1;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// A whole-day leave period from `start` to `end`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// The first day of leave.
    pub start: NaiveDate,
    /// The last day of leave.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range without checking its order.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The inclusive number of days covered, zero when inverted.
    pub fn total_days(&self) -> u32 {
        total_days(self.start, self.end)
    }

    /// Returns true if `end` is not before `start`.
    pub fn is_valid(&self) -> bool {
        self.end >= self.start
    }

    /// Checks whether `date` falls within the range (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
