//! Validation result models.
//!
//! [`RuleCode`] is the vocabulary shared by the slot validator and the weekly
//! compliance aggregator, so that a breach reported before a shift is created
//! and the same breach found afterwards carry the same code.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable identifier of a scheduling rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCode {
    /// The slot leaves the declared availability window.
    OutsideAvailability,
    /// The slot ends at or before its start.
    EndBeforeStart,
    /// The slot overlaps another work shift of the same employee and date.
    ShiftOverlap,
    /// Effective hours for the day exceed the daily maximum.
    DailyHoursExceeded,
    /// A long slot carries less break than the configured minimum.
    BreakRecommended,
    /// Weekly hours exceed the tenant's configured target.
    WeeklyTargetExceeded,
    /// Weekly hours exceed the absolute legal ceiling.
    WeeklyCeilingExceeded,
    /// The week has no rest stretch of the required length.
    InsufficientWeeklyRest,
    /// Too few pharmacists are scheduled on an opening day.
    PharmacistCoverage,
}

impl RuleCode {
    /// The wire name of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::OutsideAvailability => "OUTSIDE_AVAILABILITY",
            RuleCode::EndBeforeStart => "END_BEFORE_START",
            RuleCode::ShiftOverlap => "SHIFT_OVERLAP",
            RuleCode::DailyHoursExceeded => "DAILY_HOURS_EXCEEDED",
            RuleCode::BreakRecommended => "BREAK_RECOMMENDED",
            RuleCode::WeeklyTargetExceeded => "WEEKLY_TARGET_EXCEEDED",
            RuleCode::WeeklyCeilingExceeded => "WEEKLY_CEILING_EXCEEDED",
            RuleCode::InsufficientWeeklyRest => "INSUFFICIENT_WEEKLY_REST",
            RuleCode::PharmacistCoverage => "PHARMACIST_COVERAGE",
        }
    }

    /// The display icon associated with the rule.
    pub fn icon(self) -> &'static str {
        match self {
            RuleCode::OutsideAvailability => "📅",
            RuleCode::EndBeforeStart => "⏱️",
            RuleCode::ShiftOverlap => "⛔",
            RuleCode::DailyHoursExceeded => "⏰",
            RuleCode::BreakRecommended => "☕",
            RuleCode::WeeklyTargetExceeded => "📈",
            RuleCode::WeeklyCeilingExceeded => "🚫",
            RuleCode::InsufficientWeeklyRest => "🛌",
            RuleCode::PharmacistCoverage => "⚕️",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of an actual/limit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureUnit {
    /// Hours (or fractions of an hour).
    Hours,
    /// Minutes.
    Minutes,
    /// A head count of pharmacists.
    Pharmacists,
}

/// An observed value next to the limit it was measured against.
///
/// Reporting pages tabulate these directly, so they are kept as data
/// rather than only embedded in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitComparison {
    /// The observed value.
    pub actual: Decimal,
    /// The limit it was checked against.
    pub limit: Decimal,
    /// Unit of both values.
    pub unit: MeasureUnit,
}

/// A single validation finding, blocking or advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable code for tests and programmatic handling.
    pub code: RuleCode,
    /// Human-readable message for display.
    pub message: String,
    /// Display icon.
    pub icon: String,
    /// Actual/limit pair for limit breaches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<LimitComparison>,
    /// The shift a conflict was found with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_shift_id: Option<String>,
}

impl Issue {
    /// Creates an issue with the rule's default icon.
    pub fn new(code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            icon: code.icon().to_string(),
            comparison: None,
            conflicting_shift_id: None,
        }
    }

    /// Attaches an actual/limit pair.
    pub fn with_comparison(mut self, comparison: LimitComparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    /// Attaches the id of the conflicting shift.
    pub fn with_conflicting_shift(mut self, shift_id: impl Into<String>) -> Self {
        self.conflicting_shift_id = Some(shift_id.into());
        self
    }
}

/// The outcome of validating a candidate slot.
///
/// `is_valid` is false iff `errors` is non-empty; warnings never block
/// confirmation.
///
/// # Example
///
/// ```
/// use shift_engine::models::{Issue, RuleCode, ValidationResult};
///
/// let result = ValidationResult::new(
///     vec![],
///     vec![Issue::new(RuleCode::BreakRecommended, "Pause conseillée")],
/// );
/// assert!(result.is_valid);
/// assert!(result.has_warnings());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// False iff any blocking error was found.
    pub is_valid: bool,
    /// Blocking issues, in check order.
    pub errors: Vec<Issue>,
    /// Advisory issues, in check order.
    pub warnings: Vec<Issue>,
}

impl ValidationResult {
    /// Builds a result, deriving `is_valid` from the errors.
    pub fn new(errors: Vec<Issue>, warnings: Vec<Issue>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Returns true if any advisory issue was found.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Codes of the blocking errors, in order.
    pub fn error_codes(&self) -> Vec<RuleCode> {
        self.errors.iter().map(|issue| issue.code).collect()
    }

    /// Codes of the warnings, in order.
    pub fn warning_codes(&self) -> Vec<RuleCode> {
        self.warnings.iter().map(|issue| issue.code).collect()
    }
}
