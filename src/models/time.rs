//! Wall-clock time and interval models.
//!
//! All times are local to the pharmacy's single site and never cross midnight.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A wall-clock time with minute granularity.
///
/// Stored as minutes since midnight (0..=1439) and serialized as `HH:MM`.
///
/// # Example
///
/// ```
/// use shift_engine::models::TimeOfDay;
///
/// let time: TimeOfDay = "08:30".parse().unwrap();
/// assert_eq!(time.minutes(), 510);
/// assert_eq!(time.to_string(), "08:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// 00:00.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// 23:59, the last representable minute.
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay((MINUTES_PER_DAY - 1) as u16);

    /// Builds a time from an hour and a minute.
    pub fn from_hm(hour: u32, minute: u32) -> EngineResult<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(EngineError::TimeParse {
                input: format!("{}:{:02}", hour, minute),
                message: "hour must be below 24 and minute below 60".to_string(),
            });
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Builds a time from minutes since midnight, rejecting values outside the day.
    pub fn from_minutes(minutes: i64) -> EngineResult<Self> {
        if !(0..MINUTES_PER_DAY).contains(&minutes) {
            return Err(EngineError::TimeParse {
                input: minutes.to_string(),
                message: "minutes since midnight must be within 0..1440".to_string(),
            });
        }
        Ok(Self(minutes as u16))
    }

    /// Builds a time from minutes since midnight, clamping to `[00:00, 23:59]`.
    pub fn saturating_from_minutes(minutes: i64) -> Self {
        Self(minutes.clamp(0, MINUTES_PER_DAY - 1) as u16)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> i64 {
        i64::from(self.0)
    }

    /// The hour component (0-23).
    pub fn hour(self) -> u32 {
        u32::from(self.0) / 60
    }

    /// The minute component (0-59).
    pub fn minute(self) -> u32 {
        u32::from(self.0) % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    /// Parses `HH:MM`. A trailing `:SS`, as returned by SQL `time` columns, is
    /// accepted and truncated.
    fn from_str(s: &str) -> EngineResult<Self> {
        let trimmed = s.trim();
        let parsed = match NaiveTime::parse_from_str(trimmed, "%H:%M") {
            Ok(time) => time,
            Err(first_error) => NaiveTime::parse_from_str(trimmed, "%H:%M:%S").map_err(|_| {
                EngineError::TimeParse {
                    input: s.to_string(),
                    message: first_error.to_string(),
                }
            })?,
        };
        Self::from_hm(parsed.hour(), parsed.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// A non-empty, same-day interval `[start, end)`.
///
/// The invariant `end > start` is enforced on construction and on
/// deserialization.
///
/// # Example
///
/// ```
/// use shift_engine::models::{Interval, TimeOfDay};
///
/// let morning = Interval::parse("08:30", "13:00").unwrap();
/// assert_eq!(morning.duration_minutes(), 270);
/// assert!(Interval::parse("13:00", "08:30").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawInterval> for Interval {
    type Error = EngineError;

    fn try_from(raw: RawInterval) -> EngineResult<Self> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Creates an interval, failing unless `end > start`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> EngineResult<Self> {
        if end <= start {
            return Err(EngineError::InvalidInterval {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both bounds from `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> EngineResult<Self> {
        Self::new(start.parse()?, end.parse()?)
    }

    /// The inclusive start.
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    /// The exclusive end.
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Length in minutes, always positive.
    pub fn duration_minutes(&self) -> i64 {
        self.end.minutes() - self.start.minutes()
    }

    /// True when `other` lies entirely inside this interval.
    pub fn contains(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Half-open overlap test; touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
