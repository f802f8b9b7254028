//! Request types for the shift engine API.
//!
//! Times arrive as strings and are parsed here rather than by serde, so an
//! unparsable time comes back as a structured `INVALID_TIME` error naming
//! the offending input.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::LegalLimits;
use crate::error::EngineResult;
use crate::models::{
    AvailabilityWindow, CandidateSlot, Employee, ExistingShift, Interval, ShiftRecord,
    SlotOrigin, TimeOfDay, WeekPeriod,
};

/// A `{start, end}` pair of `HH:MM` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalRequest {
    /// Start time, `HH:MM`.
    pub start: String,
    /// End time, `HH:MM`.
    pub end: String,
}

impl IntervalRequest {
    /// Parses the pair into a non-empty interval.
    pub fn to_interval(&self) -> EngineResult<Interval> {
        Interval::parse(&self.start, &self.end)
    }
}

/// Request body for the `/suggestions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsRequest {
    /// The employee being assigned.
    pub employee_id: String,
    /// The date being assigned.
    pub date: NaiveDate,
    /// The employee's declared availability for the date.
    pub availability: IntervalRequest,
    /// Shifts already scheduled, as stored.
    #[serde(default)]
    pub shifts: Vec<ShiftRecord>,
}

impl SuggestionsRequest {
    /// The availability window the request describes.
    pub fn availability_window(&self) -> EngineResult<AvailabilityWindow> {
        availability_window(&self.employee_id, self.date, &self.availability)
    }
}

/// The candidate slot in a `/validate` request.
///
/// Start and end are parsed independently: an inverted candidate is valid
/// input and is reported by the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRequest {
    /// Proposed start, `HH:MM`.
    pub start: String,
    /// Proposed end, `HH:MM`.
    pub end: String,
    /// Planned break minutes.
    #[serde(default)]
    pub break_duration_minutes: u32,
    /// Where the candidate came from.
    #[serde(default)]
    pub origin: SlotOrigin,
}

impl CandidateRequest {
    /// Parses the candidate.
    pub fn to_candidate(&self) -> EngineResult<CandidateSlot> {
        Ok(CandidateSlot {
            start: self.start.parse::<TimeOfDay>()?,
            end: self.end.parse::<TimeOfDay>()?,
            break_duration_minutes: self.break_duration_minutes,
            origin: self.origin,
        })
    }
}

/// Request body for the `/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// The employee being assigned.
    pub employee_id: String,
    /// The date being assigned.
    pub date: NaiveDate,
    /// The employee's declared availability for the date.
    pub availability: IntervalRequest,
    /// The slot to validate.
    pub candidate: CandidateRequest,
    /// Shifts already scheduled, as stored.
    #[serde(default)]
    pub shifts: Vec<ShiftRecord>,
    /// Overrides the tenant's legal limits for this call.
    #[serde(default)]
    pub legal_limits: Option<LegalLimits>,
}

impl ValidateRequest {
    /// The availability window the request describes.
    pub fn availability_window(&self) -> EngineResult<AvailabilityWindow> {
        availability_window(&self.employee_id, self.date, &self.availability)
    }
}

/// Request body for the `/break-advice` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakAdviceRequest {
    /// Slot start, `HH:MM`.
    pub start: String,
    /// Slot end, `HH:MM`.
    pub end: String,
}

impl BreakAdviceRequest {
    /// Parses both bounds.
    pub fn bounds(&self) -> EngineResult<(TimeOfDay, TimeOfDay)> {
        Ok((self.start.parse()?, self.end.parse()?))
    }
}

/// Request body for the `/compliance` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRequest {
    /// First day of the reporting period.
    pub week_start: NaiveDate,
    /// Last day of the period; defaults to six days after `week_start`.
    #[serde(default)]
    pub week_end: Option<NaiveDate>,
    /// The pharmacy's roster.
    pub employees: Vec<Employee>,
    /// Every shift of the period, as stored. Malformed rows are tolerated.
    #[serde(default)]
    pub shifts: Vec<ShiftRecord>,
    /// Overrides the tenant's legal limits for this call.
    #[serde(default)]
    pub legal_limits: Option<LegalLimits>,
}

impl ComplianceRequest {
    /// The reporting period.
    pub fn week(&self) -> EngineResult<WeekPeriod> {
        let end = self
            .week_end
            .unwrap_or(self.week_start + Duration::days(6));
        WeekPeriod::new(self.week_start, end)
    }
}

/// Converts stored rows, failing on the first malformed one.
pub fn convert_shifts(records: &[ShiftRecord]) -> EngineResult<Vec<ExistingShift>> {
    records.iter().map(ExistingShift::try_from).collect()
}

fn availability_window(
    employee_id: &str,
    date: NaiveDate,
    interval: &IntervalRequest,
) -> EngineResult<AvailabilityWindow> {
    Ok(AvailabilityWindow {
        employee_id: employee_id.to_string(),
        date,
        interval: interval.to_interval()?,
    })
}
