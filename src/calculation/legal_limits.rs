//! Legal-limit predicates shared by the slot validator and the weekly
//! compliance aggregator.
//!
//! The validator calls these on a single candidate before a shift exists;
//! the aggregator calls them on daily and weekly totals afterwards. Both
//! therefore report the same code, severity and comparison for the same
//! breach.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LegalLimits;
use crate::models::{LimitComparison, MeasureUnit, RuleCode, Severity};

use super::time_arithmetic::{format_hours, hours_to_minutes, minutes_to_hours};

/// Absolute weekly ceiling in hours.
///
/// Distinct from [`LegalLimits::max_weekly_hours`], which is the tenant's
/// configurable target. Exceeding the target is a warning; exceeding the
/// ceiling is a blocking error.
pub const ABSOLUTE_WEEKLY_CEILING_HOURS: Decimal = Decimal::from_parts(48, 0, 0, false, 0);

/// A breached legal limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitBreach {
    /// The rule that was breached.
    pub code: RuleCode,
    /// Whether the breach blocks (critical) or advises (warning).
    pub severity: Severity,
    /// The observed value next to its limit.
    pub comparison: LimitComparison,
    /// Human-readable description.
    pub message: String,
}

impl LimitBreach {
    /// Returns true if the breach blocks confirmation.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Critical
    }
}

/// Checks a day's effective minutes against `max_daily_hours`.
///
/// Returns `None` when the day is within the limit. The limit itself is
/// allowed: only strictly greater values breach it.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::check_daily_hours;
/// use shift_engine::config::LegalLimits;
///
/// let limits = LegalLimits::default();
/// assert!(check_daily_hours(600, &limits).is_none());
/// assert!(check_daily_hours(720, &limits).is_some());
/// ```
pub fn check_daily_hours(effective_minutes: i64, limits: &LegalLimits) -> Option<LimitBreach> {
    let limit_minutes = hours_to_minutes(limits.max_daily_hours);
    if effective_minutes <= limit_minutes {
        return None;
    }

    Some(LimitBreach {
        code: RuleCode::DailyHoursExceeded,
        severity: Severity::Critical,
        comparison: hours_comparison(effective_minutes, limits.max_daily_hours),
        message: format!(
            "Durée journalière de {} supérieure au maximum de {}",
            format_hours(effective_minutes),
            format_hours(limit_minutes)
        ),
    })
}

/// Outcome of the weekly hours predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeeklyHoursStatus {
    /// At or below the tenant's target.
    WithinTarget,
    /// Above the target but at or below the absolute ceiling.
    TargetExceeded(LimitBreach),
    /// Above the absolute ceiling. The target breach is not reported alongside.
    CeilingExceeded(LimitBreach),
}

impl WeeklyHoursStatus {
    /// The breach, if any.
    pub fn breach(&self) -> Option<&LimitBreach> {
        match self {
            WeeklyHoursStatus::WithinTarget => None,
            WeeklyHoursStatus::TargetExceeded(breach)
            | WeeklyHoursStatus::CeilingExceeded(breach) => Some(breach),
        }
    }

    /// Consumes the status, returning the breach if any.
    pub fn into_breach(self) -> Option<LimitBreach> {
        match self {
            WeeklyHoursStatus::WithinTarget => None,
            WeeklyHoursStatus::TargetExceeded(breach)
            | WeeklyHoursStatus::CeilingExceeded(breach) => Some(breach),
        }
    }
}

/// Checks a week's effective minutes against the target and the absolute ceiling.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::{check_weekly_hours, WeeklyHoursStatus};
/// use shift_engine::config::LegalLimits;
///
/// let limits = LegalLimits::default();
/// assert_eq!(check_weekly_hours(32 * 60, &limits), WeeklyHoursStatus::WithinTarget);
/// assert!(matches!(
///     check_weekly_hours(40 * 60, &limits),
///     WeeklyHoursStatus::TargetExceeded(_)
/// ));
/// assert!(matches!(
///     check_weekly_hours(50 * 60, &limits),
///     WeeklyHoursStatus::CeilingExceeded(_)
/// ));
/// ```
pub fn check_weekly_hours(total_minutes: i64, limits: &LegalLimits) -> WeeklyHoursStatus {
    let ceiling_minutes = hours_to_minutes(ABSOLUTE_WEEKLY_CEILING_HOURS);
    if total_minutes > ceiling_minutes {
        return WeeklyHoursStatus::CeilingExceeded(LimitBreach {
            code: RuleCode::WeeklyCeilingExceeded,
            severity: Severity::Critical,
            comparison: hours_comparison(total_minutes, ABSOLUTE_WEEKLY_CEILING_HOURS),
            message: format!(
                "Total hebdomadaire de {} au-delà du plafond légal de {}",
                format_hours(total_minutes),
                format_hours(ceiling_minutes)
            ),
        });
    }

    let target_minutes = hours_to_minutes(limits.max_weekly_hours);
    if total_minutes > target_minutes {
        return WeeklyHoursStatus::TargetExceeded(LimitBreach {
            code: RuleCode::WeeklyTargetExceeded,
            severity: Severity::Warning,
            comparison: hours_comparison(total_minutes, limits.max_weekly_hours),
            message: format!(
                "Total hebdomadaire de {} supérieur à l'objectif de {}",
                format_hours(total_minutes),
                format_hours(target_minutes)
            ),
        });
    }

    WeeklyHoursStatus::WithinTarget
}

/// Checks that a long slot carries the mandatory break.
///
/// Breached when breaks are required, the effective duration reaches
/// `break_threshold_hours` and the planned break is shorter than
/// `break_duration_minutes`.
pub fn check_break(
    effective_minutes: i64,
    break_minutes: u32,
    limits: &LegalLimits,
) -> Option<LimitBreach> {
    if !limits.break_required {
        return None;
    }
    if effective_minutes < hours_to_minutes(limits.break_threshold_hours) {
        return None;
    }
    if break_minutes >= limits.break_duration_minutes {
        return None;
    }

    Some(LimitBreach {
        code: RuleCode::BreakRecommended,
        severity: Severity::Warning,
        comparison: LimitComparison {
            actual: Decimal::from(break_minutes),
            limit: Decimal::from(limits.break_duration_minutes),
            unit: MeasureUnit::Minutes,
        },
        message: format!(
            "Pause de {} min conseillée au-delà de {} de travail (prévue : {} min)",
            limits.break_duration_minutes,
            format_hours(hours_to_minutes(limits.break_threshold_hours)),
            break_minutes
        ),
    })
}

fn hours_comparison(actual_minutes: i64, limit_hours: Decimal) -> LimitComparison {
    LimitComparison {
        actual: minutes_to_hours(actual_minutes),
        limit: limit_hours,
        unit: MeasureUnit::Hours,
    }
}
