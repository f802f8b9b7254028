//! Compliance report models.
//!
//! This module contains the [`ComplianceReport`] produced by the weekly
//! aggregator and the per-employee and per-week structures it is made of.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::employee::EmployeeRole;
use super::validation_result::{LimitComparison, RuleCode};
use super::week::WeekPeriod;

/// How serious a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Advisory: a soft target was missed.
    Warning,
    /// A legal limit was breached.
    Critical,
}

/// A detected breach of legal limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The breached rule.
    pub code: RuleCode,
    /// Severity of the breach.
    pub severity: Severity,
    /// The employee concerned; absent for pharmacy-wide rules.
    pub employee_id: Option<String>,
    /// The day concerned; absent for weekly rules.
    pub date: Option<NaiveDate>,
    /// The actual value next to its limit.
    pub comparison: LimitComparison,
    /// Human-readable description.
    pub message: String,
}

/// Weekly hours split into the ordinary part and the two overtime bands.
///
/// # Example
///
/// ```
/// use shift_engine::models::OvertimeBreakdown;
/// use rust_decimal::Decimal;
///
/// let none = OvertimeBreakdown::default();
/// assert_eq!(none.overtime_hours(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBreakdown {
    /// Hours up to the overtime base.
    pub ordinary_hours: Decimal,
    /// Hours in the first overtime band.
    pub first_band_hours: Decimal,
    /// Hours beyond the first band.
    pub second_band_hours: Decimal,
}

impl OvertimeBreakdown {
    /// Total overtime across both bands.
    pub fn overtime_hours(&self) -> Decimal {
        self.first_band_hours + self.second_band_hours
    }
}

/// Per-employee weekly roll-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCompliance {
    /// The employee.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// The employee's role.
    pub role: EmployeeRole,
    /// Effective hours of every entry (work and non-work) in the week.
    pub total_hours: Decimal,
    /// Effective hours of work shifts only.
    pub work_hours: Decimal,
    /// Effective hours of leave and training entries.
    pub non_work_hours: Decimal,
    /// Number of work shifts in the week.
    pub shift_count: usize,
    /// Ordinary/overtime split of `total_hours`.
    pub overtime: OvertimeBreakdown,
    /// Violations attributed to this employee.
    pub violations: Vec<Violation>,
    /// False when any critical violation was found, including the absolute weekly ceiling.
    pub is_compliant: bool,
}

/// An employee left out of a report because of malformed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEmployee {
    /// The employee id as found in the data.
    pub employee_id: String,
    /// One entry per problem found.
    pub reasons: Vec<String>,
}

/// Totals for a recap page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// The period summarized.
    pub week: WeekPeriod,
    /// Sum of every employee's total hours.
    pub total_hours: Decimal,
    /// Sum of every employee's overtime hours.
    pub overtime_hours: Decimal,
    /// Number of work shifts.
    pub shift_count: usize,
    /// Number of employees aggregated.
    pub employee_count: usize,
    /// Number of employees without critical violations.
    pub compliant_employee_count: usize,
    /// The report's compliance score.
    pub score: u8,
}

/// The complete result of a weekly compliance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced it.
    pub engine_version: String,
    /// The period covered.
    pub week: WeekPeriod,
    /// 0-100, decreasing with violation count and severity.
    pub score: u8,
    /// Every violation, employee-level first, then pharmacy-wide.
    pub violations: Vec<Violation>,
    /// One entry per aggregated employee, in roster order.
    pub employee_compliance: Vec<EmployeeCompliance>,
    /// Employees left out because of malformed data.
    pub skipped_employees: Vec<SkippedEmployee>,
}

impl ComplianceReport {
    /// Number of critical violations.
    pub fn critical_count(&self) -> usize {
        self.count_severity(Severity::Critical)
    }

    /// Number of warning violations.
    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    /// Looks up the roll-up for one employee.
    pub fn employee(&self, employee_id: &str) -> Option<&EmployeeCompliance> {
        self.employee_compliance
            .iter()
            .find(|e| e.employee_id == employee_id)
    }

    /// Derives the recap-page totals.
    pub fn week_summary(&self) -> WeekSummary {
        WeekSummary {
            week: self.week,
            total_hours: self.employee_compliance.iter().map(|e| e.total_hours).sum(),
            overtime_hours: self
                .employee_compliance
                .iter()
                .map(|e| e.overtime.overtime_hours())
                .sum(),
            shift_count: self.employee_compliance.iter().map(|e| e.shift_count).sum(),
            employee_count: self.employee_compliance.len(),
            compliant_employee_count: self
                .employee_compliance
                .iter()
                .filter(|e| e.is_compliant)
                .count(),
            score: self.score,
        }
    }
}
