//! Wall-clock arithmetic on minutes since midnight.
//!
//! Every rule compares integer minutes; hours only appear when a value is
//! reported back to a caller or read from configuration.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::EngineResult;
use crate::models::TimeOfDay;

/// Quarter-hour granularity used for generated times.
pub const QUARTER_HOUR_MINUTES: i64 = 15;

/// Parses `HH:MM` into minutes since midnight.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::to_minutes;
///
/// assert_eq!(to_minutes("08:30").unwrap(), 510);
/// assert!(to_minutes("24:00").is_err());
/// ```
pub fn to_minutes(time: &str) -> EngineResult<i64> {
    Ok(time.parse::<TimeOfDay>()?.minutes())
}

/// `end - start` in minutes. Negative when `end` precedes `start`.
pub fn duration(start: TimeOfDay, end: TimeOfDay) -> i64 {
    end.minutes() - start.minutes()
}

/// Moves `time` by `delta_minutes`, saturating at `[00:00, 23:59]`.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::shift_time;
/// use shift_engine::models::TimeOfDay;
///
/// let late: TimeOfDay = "22:00".parse().unwrap();
/// assert_eq!(shift_time(late, 240), TimeOfDay::LAST_MINUTE);
/// ```
pub fn shift_time(time: TimeOfDay, delta_minutes: i64) -> TimeOfDay {
    TimeOfDay::saturating_from_minutes(time.minutes().saturating_add(delta_minutes))
}

/// Rounds to the nearest quarter hour, ties rounding up.
///
/// A result past 23:59 saturates at 23:59.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::round_to_quarter;
/// use shift_engine::models::TimeOfDay;
///
/// let t = |s: &str| s.parse::<TimeOfDay>().unwrap();
/// assert_eq!(round_to_quarter(t("14:07")), t("14:00"));
/// assert_eq!(round_to_quarter(t("14:08")), t("14:15"));
/// ```
pub fn round_to_quarter(time: TimeOfDay) -> TimeOfDay {
    let half = QUARTER_HOUR_MINUTES / 2;
    let rounded = (time.minutes() + half) / QUARTER_HOUR_MINUTES * QUARTER_HOUR_MINUTES;
    TimeOfDay::saturating_from_minutes(rounded)
}

/// Half-open overlap test: `[a_start, a_end)` and `[b_start, b_end)` share a minute.
///
/// Touching intervals (one ends when the other starts) do not overlap.
pub fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    a_start < b_end && b_start < a_end
}

/// Converts minutes to hours, rounded to two decimal places.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::minutes_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_to_hours(450), Decimal::new(75, 1));
/// assert_eq!(minutes_to_hours(20), Decimal::new(33, 2));
/// ```
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}

/// Converts configured hours to whole minutes, rounding to the nearest minute.
///
/// Saturates at `i64::MAX` (or `i64::MIN` for negative input) when the value
/// is out of range.
pub fn hours_to_minutes(hours: Decimal) -> i64 {
    let saturated = if hours.is_sign_negative() { i64::MIN } else { i64::MAX };
    hours
        .checked_mul(Decimal::from(60))
        .and_then(|minutes| minutes.round().to_i64())
        .unwrap_or(saturated)
}

/// Formats minutes as French-style hours for messages, e.g. `7h30` or `10h`.
pub fn format_hours(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    match minutes % 60 {
        0 => format!("{}{}h", sign, minutes / 60),
        rest => format!("{}{}h{:02}", sign, minutes / 60, rest),
    }
}
