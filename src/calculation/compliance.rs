//! Weekly compliance aggregation.
//!
//! Rolls a week of shifts up into a [`ComplianceReport`]. The daily and
//! weekly hour predicates are the ones the slot validator uses, applied to
//! per-date and per-week totals. Weekly rest and pharmacist coverage are
//! only checked here, since they depend on the whole week.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{EngineConfig, OvertimeConfig};
use crate::models::{
    ComplianceReport, Employee, EmployeeCompliance, ExistingShift, OvertimeBreakdown, Severity,
    ShiftRecord, SkippedEmployee, Violation, WeekPeriod,
};

use super::legal_limits::{LimitBreach, check_break, check_daily_hours, check_weekly_hours};
use super::pharmacist_coverage::pharmacist_coverage;
use super::time_arithmetic::minutes_to_hours;
use super::weekly_rest::check_weekly_rest;

/// Score deducted per critical violation.
pub const CRITICAL_PENALTY: u32 = 10;

/// Score deducted per warning violation.
pub const WARNING_PENALTY: u32 = 3;

/// Computes the 0-100 compliance score.
///
/// `100 - 10 * critical - 3 * warning`, floored at zero. Adding a violation
/// never raises the score.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::compliance_score;
///
/// assert_eq!(compliance_score(0, 0), 100);
/// assert_eq!(compliance_score(1, 2), 84);
/// assert_eq!(compliance_score(12, 0), 0);
/// ```
pub fn compliance_score(critical_count: usize, warning_count: usize) -> u8 {
    let penalty = (critical_count as u64) * u64::from(CRITICAL_PENALTY)
        + (warning_count as u64) * u64::from(WARNING_PENALTY);
    100u64.saturating_sub(penalty) as u8
}

/// Splits weekly hours into ordinary hours and two overtime bands.
///
/// The overtime base is the contract hours when given, otherwise the
/// configured `base_weekly_hours`.
pub fn overtime_breakdown(
    total_hours: Decimal,
    contract_hours: Option<Decimal>,
    config: &OvertimeConfig,
) -> OvertimeBreakdown {
    let base = contract_hours.unwrap_or(config.base_weekly_hours);
    let overtime = (total_hours - base).max(Decimal::ZERO);
    let first_band_hours = overtime.min(config.first_band_hours);

    OvertimeBreakdown {
        ordinary_hours: total_hours.min(base),
        first_band_hours,
        second_band_hours: overtime - first_band_hours,
    }
}

/// Aggregates raw shift records, tolerating malformed rows.
///
/// Records that fail to convert, and records of employees missing from the
/// roster, put their employee on the skipped list. Everyone else is still
/// aggregated.
pub fn aggregate_records(
    week: &WeekPeriod,
    employees: &[Employee],
    records: &[ShiftRecord],
    config: &EngineConfig,
) -> ComplianceReport {
    let known: HashSet<&str> = employees.iter().map(|e| e.id.as_str()).collect();

    let mut shifts = Vec::with_capacity(records.len());
    let mut problems: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for record in records {
        if !known.contains(record.employee_id.as_str()) {
            problems
                .entry(record.employee_id.clone())
                .or_default()
                .push(format!("shift '{}' references an unknown employee", record.id));
            continue;
        }
        match ExistingShift::try_from(record) {
            Ok(shift) => shifts.push(shift),
            Err(e) => problems
                .entry(record.employee_id.clone())
                .or_default()
                .push(e.to_string()),
        }
    }

    let skipped: Vec<SkippedEmployee> = problems
        .into_iter()
        .map(|(employee_id, reasons)| SkippedEmployee {
            employee_id,
            reasons,
        })
        .collect();

    for entry in &skipped {
        warn!(
            employee_id = %entry.employee_id,
            problems = entry.reasons.len(),
            first_problem = %entry.reasons.first().map(String::as_str).unwrap_or_default(),
            "Skipping employee with malformed shift data"
        );
    }

    build_report(week, employees, &shifts, config, skipped)
}

/// Aggregates already-validated shifts for a week.
///
/// Inactive employees are left out. Shifts of employees missing from the
/// roster are ignored.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::aggregate_week;
/// use shift_engine::config::EngineConfig;
/// use shift_engine::models::WeekPeriod;
/// use chrono::NaiveDate;
///
/// let week = WeekPeriod::containing(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
/// let report = aggregate_week(&week, &[], &[], &EngineConfig::default());
///
/// // Six opening days without a pharmacist
/// assert_eq!(report.critical_count(), 6);
/// assert_eq!(report.score, 40);
/// ```
pub fn aggregate_week(
    week: &WeekPeriod,
    employees: &[Employee],
    shifts: &[ExistingShift],
    config: &EngineConfig,
) -> ComplianceReport {
    build_report(week, employees, shifts, config, Vec::new())
}

fn build_report(
    week: &WeekPeriod,
    employees: &[Employee],
    shifts: &[ExistingShift],
    config: &EngineConfig,
    skipped_employees: Vec<SkippedEmployee>,
) -> ComplianceReport {
    let mut employee_compliance = Vec::new();
    let mut violations = Vec::new();

    for employee in employees.iter().filter(|e| e.is_active) {
        if skipped_employees.iter().any(|s| s.employee_id == employee.id) {
            continue;
        }
        let compliance = employee_week(week, employee, shifts, config);
        violations.extend(compliance.violations.iter().cloned());
        employee_compliance.push(compliance);
    }

    let coverage = pharmacist_coverage(
        week,
        employees,
        shifts,
        config.pharmacy(),
        config.legal_limits(),
    );
    for day in coverage {
        if let Some(breach) = day.breach {
            violations.push(violation(breach, None, Some(day.date)));
        }
    }

    let critical = violations
        .iter()
        .filter(|v| v.severity == Severity::Critical)
        .count();
    let score = compliance_score(critical, violations.len() - critical);

    debug!(
        week_start = %week.start_date,
        employees = employee_compliance.len(),
        skipped = skipped_employees.len(),
        violations = violations.len(),
        score,
        "Aggregated weekly compliance"
    );

    ComplianceReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        week: *week,
        score,
        violations,
        employee_compliance,
        skipped_employees,
    }
}

fn employee_week(
    week: &WeekPeriod,
    employee: &Employee,
    shifts: &[ExistingShift],
    config: &EngineConfig,
) -> EmployeeCompliance {
    let limits = config.legal_limits();
    let own: Vec<ExistingShift> = shifts
        .iter()
        .filter(|s| s.employee_id == employee.id && week.contains_date(s.date))
        .cloned()
        .collect();

    let mut violations = Vec::new();
    let employee_id = Some(employee.id.clone());

    let mut work_per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for shift in own.iter().filter(|s| s.is_work_shift()) {
        *work_per_day.entry(shift.date).or_default() += shift.effective_minutes();
    }
    for (date, minutes) in &work_per_day {
        if let Some(breach) = check_daily_hours(*minutes, limits) {
            violations.push(violation(breach, employee_id.clone(), Some(*date)));
        }
    }

    for shift in own.iter().filter(|s| s.is_work_shift()) {
        if let Some(breach) =
            check_break(shift.effective_minutes(), shift.break_duration_minutes, limits)
        {
            violations.push(violation(breach, employee_id.clone(), Some(shift.date)));
        }
    }

    let total_minutes: i64 = own.iter().map(ExistingShift::effective_minutes).sum();
    if let Some(breach) = check_weekly_hours(total_minutes, limits).into_breach() {
        violations.push(violation(breach, employee_id.clone(), None));
    }

    if let Some(breach) = check_weekly_rest(week, &own, limits) {
        violations.push(violation(breach, employee_id.clone(), None));
    }

    let work_minutes: i64 = work_per_day.values().sum();
    let total_hours = minutes_to_hours(total_minutes);
    let is_compliant = !violations.iter().any(|v| v.severity == Severity::Critical);

    EmployeeCompliance {
        employee_id: employee.id.clone(),
        employee_name: employee.full_name(),
        role: employee.role,
        total_hours,
        work_hours: minutes_to_hours(work_minutes),
        non_work_hours: minutes_to_hours(total_minutes - work_minutes),
        shift_count: own.iter().filter(|s| s.is_work_shift()).count(),
        overtime: overtime_breakdown(
            total_hours,
            employee.weekly_contract_hours,
            &config.scheduling().overtime,
        ),
        violations,
        is_compliant,
    }
}

fn violation(breach: LimitBreach, employee_id: Option<String>, date: Option<NaiveDate>) -> Violation {
    Violation {
        code: breach.code,
        severity: breach.severity,
        employee_id,
        date,
        comparison: breach.comparison,
        message: breach.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LegalLimits, PharmacyConfig, SchedulingConfig};
    use crate::models::{EmployeeRole, Interval, RuleCode, ShiftType};
    use chrono::Duration;

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    fn week() -> WeekPeriod {
        WeekPeriod::containing(monday())
    }

    fn employee(id: &str, role: EmployeeRole) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
            role,
            weekly_contract_hours: None,
            is_active: true,
        }
    }

    /// 08:00-16:20 with a 20 minute break: 8h effective, break satisfied.
    fn eight_hour_shift(employee_id: &str, day: i64) -> ExistingShift {
        ExistingShift {
            id: format!("{}_{}", employee_id, day),
            employee_id: employee_id.to_string(),
            date: monday() + Duration::days(day),
            interval: Interval::parse("08:00", "16:20").unwrap(),
            break_duration_minutes: 20,
            shift_type: ShiftType::Regular,
        }
    }

    fn record(id: &str, employee_id: &str, date: &str, start: &str, end: &str) -> ShiftRecord {
        ShiftRecord {
            id: id.to_string(),
            organization_id: None,
            employee_id: employee_id.to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            break_duration: Some(20),
            hours: None,
            shift_type: None,
            validated: true,
        }
    }

    /// A config whose pharmacy never opens, so coverage adds no violations.
    fn closed_pharmacy_config() -> EngineConfig {
        EngineConfig::new(
            LegalLimits::default(),
            PharmacyConfig {
                open_days: vec![],
                ..PharmacyConfig::default()
            },
            SchedulingConfig::default(),
        )
    }

    fn aggregate_days(days: i64) -> ComplianceReport {
        let employees = vec![employee("emp_001", EmployeeRole::Preparer)];
        let shifts: Vec<_> = (0..days).map(|d| eight_hour_shift("emp_001", d)).collect();
        aggregate_week(&week(), &employees, &shifts, &closed_pharmacy_config())
    }

    // ==========================================================================
    // AGG-001: three 8h shifts = 24h, compliant
    // ==========================================================================
    #[test]
    fn test_agg_001_24_hours_compliant() {
        let report = aggregate_days(3);
        let emp = report.employee("emp_001").unwrap();

        assert_eq!(emp.total_hours, dec(24));
        assert_eq!(emp.shift_count, 3);
        assert!(emp.is_compliant);
        assert!(emp.violations.is_empty());
        assert_eq!(report.score, 100);
    }

    // ==========================================================================
    // AGG-002: four 8h shifts = 32h, still compliant
    // ==========================================================================
    #[test]
    fn test_agg_002_32_hours_compliant() {
        let report = aggregate_days(4);
        let emp = report.employee("emp_001").unwrap();

        assert_eq!(emp.total_hours, dec(32));
        assert!(emp.is_compliant);
        assert!(emp.violations.is_empty());
    }

    // ==========================================================================
    // AGG-003: five 8h shifts = 40h, warning violation
    // ==========================================================================
    #[test]
    fn test_agg_003_40_hours_warning() {
        let report = aggregate_days(5);
        let emp = report.employee("emp_001").unwrap();

        assert_eq!(emp.total_hours, dec(40));
        assert_eq!(emp.violations.len(), 1);
        let violation = &emp.violations[0];
        assert_eq!(violation.code, RuleCode::WeeklyTargetExceeded);
        assert_eq!(violation.severity, Severity::Warning);
        assert_eq!(violation.comparison.actual, dec(40));
        assert_eq!(violation.comparison.limit, dec(35));
        assert!(emp.is_compliant);
        assert_eq!(report.score, 97);
    }

    // ==========================================================================
    // AGG-004: above the 48h ceiling, critical and not compliant
    // ==========================================================================
    #[test]
    fn test_agg_004_ceiling_is_critical() {
        let employees = vec![employee("emp_001", EmployeeRole::Preparer)];
        let shifts: Vec<_> = (0..5)
            .map(|d| ExistingShift {
                interval: Interval::parse("07:00", "17:20").unwrap(),
                ..eight_hour_shift("emp_001", d)
            })
            .collect();

        // 5 x 10h = 50h
        let report = aggregate_week(&week(), &employees, &shifts, &closed_pharmacy_config());
        let emp = report.employee("emp_001").unwrap();
        assert_eq!(emp.total_hours, dec(50));
        assert!(!emp.is_compliant);
        let codes: Vec<_> = emp.violations.iter().map(|v| v.code).collect();
        assert_eq!(codes, vec![RuleCode::WeeklyCeilingExceeded]);
        assert_eq!(emp.overtime.ordinary_hours, dec(35));
        assert_eq!(emp.overtime.first_band_hours, dec(8));
        assert_eq!(emp.overtime.second_band_hours, dec(7));
    }

    #[test]
    fn test_daily_total_uses_per_date_sum() {
        let employees = vec![employee("emp_001", EmployeeRole::Preparer)];
        let morning = ExistingShift {
            id: "am".to_string(),
            interval: Interval::parse("07:00", "13:00").unwrap(),
            break_duration_minutes: 0,
            shift_type: ShiftType::Morning,
            ..eight_hour_shift("emp_001", 0)
        };
        let afternoon = ExistingShift {
            id: "pm".to_string(),
            interval: Interval::parse("14:00", "19:00").unwrap(),
            break_duration_minutes: 0,
            shift_type: ShiftType::Split,
            ..eight_hour_shift("emp_001", 0)
        };

        let report = aggregate_week(
            &week(),
            &employees,
            &[morning, afternoon],
            &closed_pharmacy_config(),
        );
        let emp = report.employee("emp_001").unwrap();
        let daily: Vec<_> = emp
            .violations
            .iter()
            .filter(|v| v.code == RuleCode::DailyHoursExceeded)
            .collect();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, Some(monday()));
        assert_eq!(daily[0].comparison.actual, dec(11));
        assert!(!emp.is_compliant);
        // The 6h morning shift without a break gets a warning too.
        assert!(emp.violations.iter().any(|v| v.code == RuleCode::BreakRecommended));
    }

    #[test]
    fn test_leave_counts_toward_hours_not_shift_count() {
        let employees = vec![employee("emp_001", EmployeeRole::Preparer)];
        let mut shifts: Vec<_> = (0..4).map(|d| eight_hour_shift("emp_001", d)).collect();
        shifts.push(ExistingShift {
            shift_type: ShiftType::Leave,
            ..eight_hour_shift("emp_001", 4)
        });

        let report = aggregate_week(&week(), &employees, &shifts, &closed_pharmacy_config());
        let emp = report.employee("emp_001").unwrap();
        assert_eq!(emp.total_hours, dec(40));
        assert_eq!(emp.work_hours, dec(32));
        assert_eq!(emp.non_work_hours, dec(8));
        assert_eq!(emp.shift_count, 4);
    }

    #[test]
    fn test_long_leave_day_is_not_a_daily_breach() {
        let employees = vec![employee("emp_001", EmployeeRole::Preparer)];
        let leave = ExistingShift {
            interval: Interval::parse("08:30", "20:30").unwrap(),
            break_duration_minutes: 0,
            shift_type: ShiftType::Leave,
            ..eight_hour_shift("emp_001", 0)
        };
        // 2h of work on the same day stays far below the daily limit.
        let work = ExistingShift {
            id: "work".to_string(),
            interval: Interval::parse("21:00", "23:00").unwrap(),
            break_duration_minutes: 0,
            ..eight_hour_shift("emp_001", 0)
        };

        let shifts = [leave, work];
        let report = aggregate_week(&week(), &employees, &shifts, &closed_pharmacy_config());
        let emp = report.employee("emp_001").unwrap();
        assert_eq!(emp.total_hours, dec(14));
        assert_eq!(emp.work_hours, dec(2));
        assert_eq!(emp.non_work_hours, dec(12));
        assert!(
            emp.violations
                .iter()
                .all(|v| v.code != RuleCode::DailyHoursExceeded)
        );
        assert!(emp.is_compliant);
    }

    #[test]
    fn test_insufficient_weekly_rest_is_critical() {
        let employees = vec![employee("emp_001", EmployeeRole::Preparer)];
        let shifts: Vec<_> = (0..7)
            .map(|d| ExistingShift {
                interval: Interval::parse("10:00", "14:00").unwrap(),
                break_duration_minutes: 0,
                ..eight_hour_shift("emp_001", d)
            })
            .collect();

        let report = aggregate_week(&week(), &employees, &shifts, &closed_pharmacy_config());
        let emp = report.employee("emp_001").unwrap();
        assert!(emp
            .violations
            .iter()
            .any(|v| v.code == RuleCode::InsufficientWeeklyRest && v.severity == Severity::Critical));
        assert!(!emp.is_compliant);
    }

    #[test]
    fn test_coverage_violations_are_pharmacy_wide() {
        let employees = vec![
            employee("pharma_1", EmployeeRole::Pharmacist),
            employee("prep_1", EmployeeRole::Preparer),
        ];
        let shifts: Vec<_> = (0..5).map(|d| eight_hour_shift("pharma_1", d)).collect();

        let report = aggregate_week(&week(), &employees, &shifts, &EngineConfig::default());
        let coverage: Vec<_> = report
            .violations
            .iter()
            .filter(|v| v.code == RuleCode::PharmacistCoverage)
            .collect();

        // Saturday is open and uncovered
        assert_eq!(coverage.len(), 1);
        assert_eq!(coverage[0].employee_id, None);
        assert_eq!(coverage[0].date, Some(monday() + Duration::days(5)));
        // 1 critical coverage + 1 weekly target warning
        assert_eq!(report.score, 87);
    }

    #[test]
    fn test_inactive_employees_excluded() {
        let mut inactive = employee("emp_002", EmployeeRole::Preparer);
        inactive.is_active = false;
        let employees = vec![employee("emp_001", EmployeeRole::Preparer), inactive];

        let report = aggregate_week(&week(), &employees, &[], &closed_pharmacy_config());
        assert_eq!(report.employee_compliance.len(), 1);
        assert!(report.employee("emp_002").is_none());
    }

    #[test]
    fn test_records_partial_failure() {
        let employees = vec![
            employee("emp_001", EmployeeRole::Preparer),
            employee("emp_002", EmployeeRole::Preparer),
        ];
        let records = vec![
            record("s1", "emp_001", "2026-03-09", "08:00:00", "16:20:00"),
            record("s2", "emp_002", "2026-03-09", "16:00", "08:00"),
            record("s3", "emp_002", "2026-03-10", "08:00", "16:20"),
            record("s4", "emp_404", "2026-03-10", "08:00", "16:20"),
        ];

        let report = aggregate_records(&week(), &employees, &records, &closed_pharmacy_config());

        assert_eq!(report.employee_compliance.len(), 1);
        assert_eq!(report.employee("emp_001").unwrap().total_hours, dec(8));

        let skipped: Vec<_> = report
            .skipped_employees
            .iter()
            .map(|s| s.employee_id.as_str())
            .collect();
        assert_eq!(skipped, vec!["emp_002", "emp_404"]);
        assert_eq!(report.skipped_employees[0].reasons.len(), 1);
        assert!(report.skipped_employees[1].reasons[0].contains("unknown employee"));
    }

    #[test]
    fn test_overtime_uses_contract_hours() {
        let breakdown = overtime_breakdown(dec(30), Some(dec(24)), &OvertimeConfig::default());
        assert_eq!(breakdown.ordinary_hours, dec(24));
        assert_eq!(breakdown.first_band_hours, dec(6));
        assert_eq!(breakdown.second_band_hours, Decimal::ZERO);
    }

    #[test]
    fn test_score_is_monotonic_and_floored() {
        assert_eq!(compliance_score(0, 0), 100);
        assert!(compliance_score(1, 0) < compliance_score(0, 1));
        assert!(compliance_score(2, 3) <= compliance_score(2, 2));
        assert_eq!(compliance_score(0, 40), 0);
    }

    #[test]
    fn test_report_metadata() {
        let report = aggregate_days(1);
        assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(report.week, week());
        assert!(report.skipped_employees.is_empty());
    }
}
