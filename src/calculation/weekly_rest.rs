//! Weekly rest detection.
//!
//! Finds the longest stretch without work inside a reporting period,
//! counting from the period start and up to the period end.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::LegalLimits;
use crate::models::{
    ExistingShift, LimitComparison, MINUTES_PER_DAY, MeasureUnit, RuleCode, Severity, WeekPeriod,
};

use super::legal_limits::LimitBreach;
use super::time_arithmetic::{format_hours, hours_to_minutes, minutes_to_hours};

/// The longest uninterrupted rest found in a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestStretch {
    /// When the rest begins.
    pub start: NaiveDateTime,
    /// When the rest ends.
    pub end: NaiveDateTime,
    /// Length in minutes.
    pub minutes: i64,
}

/// Finds the longest stretch of the period without a work shift.
///
/// Only work shifts dated inside the period interrupt rest; leave and
/// training do not. A period with no work is one single stretch.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::longest_rest;
/// use shift_engine::models::WeekPeriod;
/// use chrono::NaiveDate;
///
/// let week = WeekPeriod::containing(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
/// let rest = longest_rest(&week, &[]);
/// assert_eq!(rest.minutes, 7 * 24 * 60);
/// ```
pub fn longest_rest(week: &WeekPeriod, shifts: &[ExistingShift]) -> RestStretch {
    let mut spans: Vec<(i64, i64)> = shifts
        .iter()
        .filter(|shift| shift.is_work_shift() && week.contains_date(shift.date))
        .map(|shift| {
            let day_offset = week.day_index(shift.date) * MINUTES_PER_DAY;
            (
                day_offset + shift.interval.start().minutes(),
                day_offset + shift.interval.end().minutes(),
            )
        })
        .collect();
    spans.sort_unstable();

    let mut best = (0, 0);
    let mut cursor = 0;
    for (start, end) in spans {
        if start - cursor > best.1 - best.0 {
            best = (cursor, start);
        }
        cursor = cursor.max(end);
    }
    let period_end = week.day_count() * MINUTES_PER_DAY;
    if period_end - cursor > best.1 - best.0 {
        best = (cursor, period_end);
    }

    let origin = week.start_date.and_time(NaiveTime::MIN);
    RestStretch {
        start: origin + Duration::minutes(best.0),
        end: origin + Duration::minutes(best.1),
        minutes: best.1 - best.0,
    }
}

/// Checks the longest rest of the period against `min_rest_hours_weekly`.
///
/// Returns the breach, critical, when the rest is shorter than required.
pub fn check_weekly_rest(
    week: &WeekPeriod,
    shifts: &[ExistingShift],
    limits: &LegalLimits,
) -> Option<LimitBreach> {
    let rest = longest_rest(week, shifts);
    let required = hours_to_minutes(limits.min_rest_hours_weekly);
    if rest.minutes >= required {
        return None;
    }

    Some(LimitBreach {
        code: RuleCode::InsufficientWeeklyRest,
        severity: Severity::Critical,
        comparison: LimitComparison {
            actual: minutes_to_hours(rest.minutes),
            limit: limits.min_rest_hours_weekly,
            unit: MeasureUnit::Hours,
        },
        message: format!(
            "Repos hebdomadaire le plus long de {} inférieur aux {} requises",
            format_hours(rest.minutes),
            format_hours(required)
        ),
    })
}
