//! Shift models and related types.
//!
//! This module defines committed shifts ([`ExistingShift`]), the raw rows the
//! data layer returns for them ([`ShiftRecord`]), the in-progress
//! [`CandidateSlot`] edited in the quick-assign panel, and the
//! [`ShiftCreation`] payload emitted when a candidate is confirmed.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::time::{Interval, TimeOfDay};

/// The kind of entry a shift represents.
///
/// Work shifts take part in overlap checks, rest and coverage. Non-work
/// entries (leave, training) only count toward hours totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// A standard working shift.
    #[default]
    Regular,
    /// A morning working shift.
    Morning,
    /// An afternoon working shift.
    Afternoon,
    /// A second working shift on a day that already has one.
    Split,
    /// Paid or unpaid leave.
    Leave,
    /// Off-counter training.
    Training,
}

impl ShiftType {
    /// Returns true for entries that occupy the employee at the counter.
    ///
    /// This is the single work/non-work classification used by the suggestion
    /// generator, the validator and the compliance aggregator.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::ShiftType;
    ///
    /// assert!(ShiftType::Split.is_work_shift());
    /// assert!(!ShiftType::Leave.is_work_shift());
    /// ```
    pub fn is_work_shift(self) -> bool {
        matches!(
            self,
            ShiftType::Regular | ShiftType::Morning | ShiftType::Afternoon | ShiftType::Split
        )
    }

    /// The wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftType::Regular => "regular",
            ShiftType::Morning => "morning",
            ShiftType::Afternoon => "afternoon",
            ShiftType::Split => "split",
            ShiftType::Leave => "leave",
            ShiftType::Training => "training",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(ShiftType::Regular),
            "morning" => Ok(ShiftType::Morning),
            "afternoon" => Ok(ShiftType::Afternoon),
            "split" => Ok(ShiftType::Split),
            "leave" => Ok(ShiftType::Leave),
            "training" => Ok(ShiftType::Training),
            other => Err(format!("unknown shift type '{}'", other)),
        }
    }
}

/// A committed shift, owned by the data layer and read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingShift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee working the shift.
    pub employee_id: String,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// The scheduled interval.
    pub interval: Interval,
    /// Unpaid break taken during the shift.
    #[serde(default)]
    pub break_duration_minutes: u32,
    /// Work or non-work classification.
    #[serde(rename = "type", default)]
    pub shift_type: ShiftType,
}

impl ExistingShift {
    /// Duration minus break, never negative.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::{ExistingShift, Interval, ShiftType};
    /// use chrono::NaiveDate;
    ///
    /// let shift = ExistingShift {
    ///     id: "shift_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
    ///     interval: Interval::parse("08:30", "17:00").unwrap(),
    ///     break_duration_minutes: 30,
    ///     shift_type: ShiftType::Regular,
    /// };
    /// assert_eq!(shift.effective_minutes(), 480);
    /// ```
    pub fn effective_minutes(&self) -> i64 {
        (self.interval.duration_minutes() - i64::from(self.break_duration_minutes)).max(0)
    }

    /// Shorthand for `self.shift_type.is_work_shift()`.
    pub fn is_work_shift(&self) -> bool {
        self.shift_type.is_work_shift()
    }
}

/// A raw shift row as returned by the data layer.
///
/// Dates and times are kept as strings so that one malformed row can be
/// reported against its employee instead of failing a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Row identifier.
    pub id: String,
    /// Owning organization (tenant).
    #[serde(default)]
    pub organization_id: Option<String>,
    /// The employee working the shift.
    pub employee_id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    /// End time, `HH:MM` or `HH:MM:SS`.
    pub end_time: String,
    /// Unpaid break minutes.
    #[serde(default)]
    pub break_duration: Option<u32>,
    /// Hours as stored by the application (informational only).
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Shift type name; missing means `regular`.
    #[serde(rename = "type", default)]
    pub shift_type: Option<String>,
    /// Whether a manager validated the shift.
    #[serde(default)]
    pub validated: bool,
}

impl TryFrom<&ShiftRecord> for ExistingShift {
    type Error = EngineError;

    fn try_from(record: &ShiftRecord) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidShift {
            shift_id: record.id.clone(),
            message,
        };

        let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d")
            .map_err(|e| invalid(format!("invalid date '{}': {}", record.date, e)))?;
        let start: TimeOfDay = record.start_time.parse()?;
        let end: TimeOfDay = record.end_time.parse()?;
        let interval = Interval::new(start, end)
            .map_err(|_| invalid(format!("end {} is not after start {}", end, start)))?;

        let break_duration_minutes = record.break_duration.unwrap_or(0);
        if i64::from(break_duration_minutes) >= interval.duration_minutes() {
            return Err(invalid(format!(
                "break of {} minutes does not fit in a {} minute shift",
                break_duration_minutes,
                interval.duration_minutes()
            )));
        }

        let shift_type = match record.shift_type.as_deref() {
            None => ShiftType::Regular,
            Some(name) => name.parse().map_err(invalid)?,
        };

        Ok(ExistingShift {
            id: record.id.clone(),
            employee_id: record.employee_id.clone(),
            date,
            interval,
            break_duration_minutes,
            shift_type,
        })
    }
}

/// Which suggestion a candidate slot was seeded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// The entire availability window.
    Full,
    /// The first part of a split window.
    Morning,
    /// The second part of a split window.
    Afternoon,
    /// A fixed-length, manually adjustable default.
    Custom,
}

impl SuggestionKind {
    /// The stable suggestion id.
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionKind::Full => "full",
            SuggestionKind::Morning => "morning",
            SuggestionKind::Afternoon => "afternoon",
            SuggestionKind::Custom => "custom",
        }
    }
}

/// Provenance of a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotOrigin {
    /// Picked from a generated suggestion.
    Suggestion {
        /// The suggestion it came from.
        suggestion_id: SuggestionKind,
    },
    /// Typed in by hand.
    #[default]
    Manual,
}

/// An unconfirmed proposed shift being edited in the assignment panel.
///
/// Start and end are kept as independent times: a candidate may be
/// temporarily inverted while the user edits it, which the validator reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    /// Proposed start.
    pub start: TimeOfDay,
    /// Proposed end.
    pub end: TimeOfDay,
    /// Unpaid break planned for the slot.
    #[serde(default)]
    pub break_duration_minutes: u32,
    /// Where the slot came from.
    #[serde(default)]
    pub origin: SlotOrigin,
}

impl CandidateSlot {
    /// A candidate covering `interval` with no break.
    pub fn from_interval(interval: Interval, origin: SlotOrigin) -> Self {
        Self {
            start: interval.start(),
            end: interval.end(),
            break_duration_minutes: 0,
            origin,
        }
    }

    /// `end - start`; negative when the candidate is inverted.
    pub fn duration_minutes(&self) -> i64 {
        self.end.minutes() - self.start.minutes()
    }

    /// Duration minus break.
    pub fn effective_minutes(&self) -> i64 {
        self.duration_minutes() - i64::from(self.break_duration_minutes)
    }

    /// The candidate as an [`Interval`], if it is non-empty.
    pub fn interval(&self) -> EngineResult<Interval> {
        Interval::new(self.start, self.end)
    }
}

/// Shift-creation payload sent to the data layer on confirmation.
///
/// Field names match the `shifts` table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCreation {
    /// Owning organization (tenant), when known.
    pub organization_id: Option<String>,
    /// The employee the shift is for.
    pub employee_id: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// Start time.
    pub start_time: TimeOfDay,
    /// End time.
    pub end_time: TimeOfDay,
    /// Unpaid break minutes.
    pub break_duration: u32,
    /// Effective hours (duration minus break).
    pub hours: Decimal,
    /// Work shift type.
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    /// Newly created shifts are never pre-validated.
    pub validated: bool,
}
