//! Core data models for the shift engine.
//!
//! This module contains all the domain models used throughout the engine.

mod availability;
mod compliance_report;
mod employee;
mod shift;
mod time;
mod validation_result;
mod week;

pub use availability::AvailabilityWindow;
pub use compliance_report::{
    ComplianceReport, EmployeeCompliance, OvertimeBreakdown, Severity, SkippedEmployee, Violation,
    WeekSummary,
};
pub use employee::{Employee, EmployeeRole};
pub use shift::{
    CandidateSlot, ExistingShift, ShiftCreation, ShiftRecord, ShiftType, SlotOrigin,
    SuggestionKind,
};
pub use time::{Interval, MINUTES_PER_DAY, TimeOfDay};
pub use validation_result::{Issue, LimitComparison, MeasureUnit, RuleCode, ValidationResult};
pub use week::WeekPeriod;
