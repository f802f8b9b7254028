//! Scheduling rules for the shift engine.
//!
//! This module contains the pure functions behind slot assignment and
//! reporting: wall-clock arithmetic, the shared legal-limit predicates,
//! slot suggestions, candidate validation, break advice, weekly rest,
//! pharmacist coverage and weekly compliance aggregation.

mod break_advice;
mod compliance;
mod legal_limits;
mod pharmacist_coverage;
mod slot_validation;
mod suggestions;
mod time_arithmetic;
mod weekly_rest;

pub use break_advice::{BreakAdvice, advise_break};
pub use compliance::{
    CRITICAL_PENALTY, WARNING_PENALTY, aggregate_records, aggregate_week, compliance_score,
    overtime_breakdown,
};
pub use legal_limits::{
    ABSOLUTE_WEEKLY_CEILING_HOURS, LimitBreach, WeeklyHoursStatus, check_break, check_daily_hours,
    check_weekly_hours,
};
pub use pharmacist_coverage::{DailyCoverage, pharmacist_coverage};
pub use slot_validation::validate_slot;
pub use suggestions::{SuggestedSlot, generate_suggestions, split_point};
pub use time_arithmetic::{
    QUARTER_HOUR_MINUTES, duration, format_hours, hours_to_minutes, minutes_to_hours, overlaps,
    round_to_quarter, shift_time, to_minutes,
};
pub use weekly_rest::{RestStretch, check_weekly_rest, longest_rest};
