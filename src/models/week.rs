//! Reporting period model.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Longest period a report may cover, in days.
pub const MAX_PERIOD_DAYS: i64 = 7;

/// An inclusive date range a compliance report covers, usually one ISO week.
///
/// # Example
///
/// ```
/// use shift_engine::models::WeekPeriod;
/// use chrono::NaiveDate;
///
/// // 2026-03-11 is a Wednesday
/// let week = WeekPeriod::containing(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
/// assert_eq!(week.start_date, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
/// assert_eq!(week.end_date, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
/// assert_eq!(week.dates().count(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl WeekPeriod {
    /// Creates a period, failing if `end_date` precedes `start_date` or the
    /// range spans more than seven days. Weekly limits apply to one week.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let invalid = |message: &str| EngineError::InvalidWeek {
            start: start_date,
            end: end_date,
            message: message.to_string(),
        };
        if end_date < start_date {
            return Err(invalid("end date is before start date"));
        }
        if (end_date - start_date).num_days() >= MAX_PERIOD_DAYS {
            return Err(invalid("period cannot exceed 7 days"));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The Monday-to-Sunday week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start_date = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        Self {
            start_date,
            end_date: start_date + Duration::days(6),
        }
    }

    /// Checks if a date falls within the period (inclusive on both ends).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of days in the period.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Zero-based index of `date` within the period.
    pub fn day_index(&self, date: NaiveDate) -> i64 {
        (date - self.start_date).num_days()
    }

    /// Every date of the period in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |date| *date <= self.end_date)
    }
}
