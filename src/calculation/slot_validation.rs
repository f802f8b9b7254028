//! Candidate slot validation.
//!
//! Runs on every edit in the quick-assign panel, so it is pure and linear in
//! the employee's shifts for the week.

use crate::config::LegalLimits;
use crate::models::{
    AvailabilityWindow, CandidateSlot, ExistingShift, Issue, RuleCode, ValidationResult,
    WeekPeriod,
};

use super::legal_limits::{
    LimitBreach, WeeklyHoursStatus, check_break, check_daily_hours, check_weekly_hours,
};

/// Validates a candidate slot for the employee and date of `availability`.
///
/// Checks run in a fixed order and accumulate, so a single call reports
/// every problem:
///
/// 1. the slot lies inside the availability window (`OUTSIDE_AVAILABILITY`)
/// 2. the slot ends after it starts (`END_BEFORE_START`)
/// 3. no overlap with a work shift of the same employee and date (`SHIFT_OVERLAP`)
/// 4. effective hours of the day within `max_daily_hours` (`DAILY_HOURS_EXCEEDED`)
/// 5. mandatory break planned on long slots (`BREAK_RECOMMENDED`, warning)
/// 6. weekly total within the target (`WEEKLY_TARGET_EXCEEDED`, warning) and
///    the absolute ceiling (`WEEKLY_CEILING_EXCEEDED`)
///
/// The daily total is the candidate's effective minutes plus the employee's
/// other work shifts on the same date, which is what the weekly report
/// checks afterwards. The break check applies to the candidate alone.
///
/// The weekly total is the candidate's effective minutes plus every other
/// entry of the employee in the Monday-based week of the date, leave and
/// training included.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::validate_slot;
/// use shift_engine::config::LegalLimits;
/// use shift_engine::models::{AvailabilityWindow, CandidateSlot, Interval, SlotOrigin};
/// use chrono::NaiveDate;
///
/// let availability = AvailabilityWindow {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     interval: Interval::parse("08:30", "20:30").unwrap(),
/// };
/// let candidate = CandidateSlot::from_interval(
///     Interval::parse("08:30", "14:00").unwrap(),
///     SlotOrigin::Manual,
/// );
///
/// let result = validate_slot(&candidate, &availability, &[], &LegalLimits::default());
/// assert!(result.is_valid);
/// assert!(result.warnings.is_empty());
/// ```
pub fn validate_slot(
    candidate: &CandidateSlot,
    availability: &AvailabilityWindow,
    existing_shifts: &[ExistingShift],
    limits: &LegalLimits,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let window = availability.interval;

    if candidate.start < window.start() || candidate.end > window.end() {
        errors.push(Issue::new(
            RuleCode::OutsideAvailability,
            format!(
                "Le créneau {}-{} dépasse la disponibilité déclarée ({})",
                candidate.start, candidate.end, window
            ),
        ));
    }

    let interval = candidate.interval().ok();
    if interval.is_none() {
        errors.push(Issue::new(
            RuleCode::EndBeforeStart,
            format!(
                "L'heure de fin ({}) doit être après l'heure de début ({})",
                candidate.end, candidate.start
            ),
        ));
    }

    if let Some(interval) = interval {
        let conflicts = existing_shifts.iter().filter(|shift| {
            shift.employee_id == availability.employee_id
                && shift.date == availability.date
                && shift.is_work_shift()
                && shift.interval.overlaps(&interval)
        });
        for shift in conflicts {
            errors.push(
                Issue::new(
                    RuleCode::ShiftOverlap,
                    format!("Chevauche le créneau existant {}", shift.interval),
                )
                .with_conflicting_shift(shift.id.clone()),
            );
        }
    }

    let effective_minutes = candidate.effective_minutes().max(0);
    let same_day_minutes: i64 = existing_shifts
        .iter()
        .filter(|shift| {
            shift.employee_id == availability.employee_id
                && shift.date == availability.date
                && shift.is_work_shift()
        })
        .map(ExistingShift::effective_minutes)
        .sum();

    if let Some(breach) = check_daily_hours(same_day_minutes + effective_minutes, limits) {
        errors.push(issue_from(breach));
    }

    if let Some(breach) = check_break(effective_minutes, candidate.break_duration_minutes, limits) {
        warnings.push(issue_from(breach));
    }

    let week = WeekPeriod::containing(availability.date);
    let other_minutes: i64 = existing_shifts
        .iter()
        .filter(|shift| {
            shift.employee_id == availability.employee_id && week.contains_date(shift.date)
        })
        .map(ExistingShift::effective_minutes)
        .sum();
    match check_weekly_hours(other_minutes + effective_minutes, limits) {
        WeeklyHoursStatus::WithinTarget => {}
        WeeklyHoursStatus::TargetExceeded(breach) => warnings.push(issue_from(breach)),
        WeeklyHoursStatus::CeilingExceeded(breach) => errors.push(issue_from(breach)),
    }

    ValidationResult::new(errors, warnings)
}

fn issue_from(breach: LimitBreach) -> Issue {
    Issue::new(breach.code, breach.message).with_comparison(breach.comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Interval, MeasureUnit, ShiftType, SlotOrigin, TimeOfDay};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn date() -> NaiveDate {
        // Tuesday
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn availability(start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow {
            employee_id: "emp_001".to_string(),
            date: date(),
            interval: Interval::parse(start, end).unwrap(),
        }
    }

    fn candidate(start: &str, end: &str, break_minutes: u32) -> CandidateSlot {
        CandidateSlot {
            start: t(start),
            end: t(end),
            break_duration_minutes: break_minutes,
            origin: SlotOrigin::Manual,
        }
    }

    fn shift_on(
        id: &str,
        date: NaiveDate,
        start: &str,
        end: &str,
        shift_type: ShiftType,
    ) -> ExistingShift {
        ExistingShift {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            date,
            interval: Interval::parse(start, end).unwrap(),
            break_duration_minutes: 0,
            shift_type,
        }
    }

    fn validate(candidate: &CandidateSlot, shifts: &[ExistingShift]) -> ValidationResult {
        validate_slot(
            candidate,
            &availability("08:00", "21:00"),
            shifts,
            &LegalLimits::default(),
        )
    }

    // ==========================================================================
    // VAL-001: simple valid slot
    // ==========================================================================
    #[test]
    fn test_val_001_simple_valid_slot() {
        let result = validate_slot(
            &candidate("08:30", "14:00", 0),
            &availability("08:30", "20:30"),
            &[],
            &LegalLimits::default(),
        );

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    // ==========================================================================
    // VAL-002: overlap rejection names the conflicting shift
    // ==========================================================================
    #[test]
    fn test_val_002_overlap_rejected() {
        let shifts = vec![shift_on("shift_042", date(), "09:00", "13:00", ShiftType::Morning)];
        let result = validate(&candidate("12:00", "18:00", 20), &shifts);

        assert!(!result.is_valid);
        assert_eq!(result.error_codes(), vec![RuleCode::ShiftOverlap]);
        assert_eq!(
            result.errors[0].conflicting_shift_id.as_deref(),
            Some("shift_042")
        );
    }

    // ==========================================================================
    // VAL-003: mandatory break warning does not block
    // ==========================================================================
    #[test]
    fn test_val_003_break_warning() {
        let result = validate(&candidate("08:30", "15:30", 0), &[]);

        assert!(result.is_valid);
        assert_eq!(result.warning_codes(), vec![RuleCode::BreakRecommended]);
        let comparison = result.warnings[0].comparison.unwrap();
        assert_eq!(comparison.unit, MeasureUnit::Minutes);
        assert_eq!(comparison.limit, Decimal::new(20, 0));
    }

    // ==========================================================================
    // VAL-004: 13h with 1h break exceeds the daily limit
    // ==========================================================================
    #[test]
    fn test_val_004_daily_ceiling_breach() {
        let result = validate(&candidate("08:00", "21:00", 60), &[]);

        assert!(!result.is_valid);
        assert_eq!(result.error_codes(), vec![RuleCode::DailyHoursExceeded]);
        let comparison = result.errors[0].comparison.unwrap();
        assert_eq!(comparison.actual, Decimal::new(12, 0));
        assert_eq!(comparison.limit, Decimal::new(10, 0));
    }

    // ==========================================================================
    // VAL-009: the daily limit covers the other work shifts of the day
    // ==========================================================================
    #[test]
    fn test_val_009_daily_limit_includes_same_day_shifts() {
        let shifts = vec![
            shift_on("shift_001", date(), "08:00", "13:00", ShiftType::Morning),
            shift_on("leave_001", date(), "19:00", "21:00", ShiftType::Leave),
        ];
        // 5h + 5h40 = 10h40, leave excluded
        let result = validate(&candidate("13:00", "19:00", 20), &shifts);

        assert!(!result.is_valid);
        assert_eq!(result.error_codes(), vec![RuleCode::DailyHoursExceeded]);
        let comparison = result.errors[0].comparison.unwrap();
        assert_eq!(comparison.actual, Decimal::new(1067, 2));
        assert_eq!(comparison.limit, Decimal::new(10, 0));
    }

    // ==========================================================================
    // VAL-005: inverted slot
    // ==========================================================================
    #[test]
    fn test_val_005_end_before_start() {
        let result = validate(&candidate("14:00", "09:00", 0), &[]);

        assert!(!result.is_valid);
        assert_eq!(result.error_codes(), vec![RuleCode::EndBeforeStart]);
    }

    #[test]
    fn test_equal_start_and_end_is_empty() {
        let result = validate(&candidate("10:00", "10:00", 0), &[]);
        assert_eq!(result.error_codes(), vec![RuleCode::EndBeforeStart]);
    }

    // ==========================================================================
    // VAL-006: checks accumulate in order
    // ==========================================================================
    #[test]
    fn test_val_006_errors_accumulate_in_order() {
        let shifts = vec![shift_on("shift_001", date(), "10:00", "11:00", ShiftType::Regular)];
        let result = validate_slot(
            &candidate("07:00", "20:00", 0),
            &availability("08:00", "21:00"),
            &shifts,
            &LegalLimits::default(),
        );

        assert_eq!(
            result.error_codes(),
            vec![
                RuleCode::OutsideAvailability,
                RuleCode::ShiftOverlap,
                RuleCode::DailyHoursExceeded,
            ]
        );
        assert_eq!(result.warning_codes(), vec![RuleCode::BreakRecommended]);
    }

    #[test]
    fn test_touching_shift_is_not_an_overlap() {
        let shifts = vec![shift_on("shift_001", date(), "08:00", "12:00", ShiftType::Morning)];
        let result = validate(&candidate("12:00", "16:00", 0), &shifts);
        assert!(result.is_valid);
    }

    #[test]
    fn test_leave_does_not_overlap_but_counts_hours() {
        let monday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let shifts = vec![
            shift_on("leave_001", date(), "08:00", "21:00", ShiftType::Leave),
            shift_on("shift_001", monday, "08:00", "18:00", ShiftType::Regular),
            shift_on("training_001", monday, "18:00", "20:00", ShiftType::Training),
        ];
        // 13h leave + 10h + 2h training + 5h40 candidate = 30h40
        let result = validate(&candidate("09:00", "15:00", 20), &shifts);
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }

    // ==========================================================================
    // VAL-007: weekly target exceeded is a warning
    // ==========================================================================
    #[test]
    fn test_val_007_weekly_target_warning() {
        let week = WeekPeriod::containing(date());
        let shifts: Vec<ExistingShift> = week
            .dates()
            .filter(|d| *d != date())
            .take(4)
            .enumerate()
            .map(|(i, d)| {
                shift_on(&format!("shift_{}", i), d, "09:00", "17:00", ShiftType::Regular)
            })
            .collect();

        // 4 x 8h + 5h = 37h
        let result = validate(&candidate("09:00", "14:00", 0), &shifts);
        assert!(result.is_valid);
        assert_eq!(result.warning_codes(), vec![RuleCode::WeeklyTargetExceeded]);
        let comparison = result.warnings[0].comparison.unwrap();
        assert_eq!(comparison.actual, Decimal::new(37, 0));
        assert_eq!(comparison.limit, Decimal::new(35, 0));
    }

    // ==========================================================================
    // VAL-008: absolute ceiling replaces the target warning
    // ==========================================================================
    #[test]
    fn test_val_008_weekly_ceiling_error() {
        let week = WeekPeriod::containing(date());
        let shifts: Vec<ExistingShift> = week
            .dates()
            .filter(|d| *d != date())
            .take(5)
            .enumerate()
            .map(|(i, d)| {
                shift_on(&format!("shift_{}", i), d, "08:00", "17:00", ShiftType::Regular)
            })
            .collect();

        // 5 x 9h + 6h = 51h
        let result = validate(&candidate("09:00", "15:20", 20), &shifts);
        assert!(!result.is_valid);
        assert_eq!(result.error_codes(), vec![RuleCode::WeeklyCeilingExceeded]);
        assert!(!result.warning_codes().contains(&RuleCode::WeeklyTargetExceeded));
    }

    #[test]
    fn test_shifts_outside_week_ignored() {
        let next_week = date() + chrono::Duration::days(7);
        let shifts: Vec<ExistingShift> = (0..5)
            .map(|i| {
                shift_on(
                    &format!("shift_{}", i),
                    next_week,
                    "08:00",
                    "18:00",
                    ShiftType::Regular,
                )
            })
            .collect();
        let result = validate(&candidate("09:00", "13:00", 0), &shifts);
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }
}
