//! Daily pharmacist coverage.
//!
//! A pharmacy may not open without a pharmacist on site. Coverage is checked
//! per opening day: the number of distinct pharmacists with a work shift that
//! day must reach `min_pharmacists`.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{LegalLimits, PharmacyConfig};
use crate::models::{
    Employee, ExistingShift, LimitComparison, MeasureUnit, RuleCode, Severity, WeekPeriod,
};

use super::legal_limits::LimitBreach;

/// Pharmacist head count for one opening day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCoverage {
    /// The day.
    pub date: NaiveDate,
    /// Distinct pharmacists with a work shift that day.
    pub pharmacist_count: u32,
    /// Breach when the count is below the minimum.
    pub breach: Option<LimitBreach>,
}

/// Computes pharmacist coverage for every opening day of the period.
///
/// Days the pharmacy is closed are not reported. Leave and training entries
/// do not count as presence.
pub fn pharmacist_coverage(
    week: &WeekPeriod,
    employees: &[Employee],
    shifts: &[ExistingShift],
    pharmacy: &PharmacyConfig,
    limits: &LegalLimits,
) -> Vec<DailyCoverage> {
    let pharmacists: HashSet<&str> = employees
        .iter()
        .filter(|e| e.is_active && e.is_pharmacist())
        .map(|e| e.id.as_str())
        .collect();

    let mut present: HashMap<NaiveDate, HashSet<&str>> = HashMap::new();
    for shift in shifts {
        if shift.is_work_shift()
            && week.contains_date(shift.date)
            && pharmacists.contains(shift.employee_id.as_str())
        {
            present
                .entry(shift.date)
                .or_default()
                .insert(shift.employee_id.as_str());
        }
    }

    week.dates()
        .filter(|date| pharmacy.open_days.contains(&date.weekday()))
        .map(|date| {
            let count = present.get(&date).map_or(0, |ids| ids.len()) as u32;
            let breach = (count < limits.min_pharmacists).then(|| LimitBreach {
                code: RuleCode::PharmacistCoverage,
                severity: Severity::Critical,
                comparison: LimitComparison {
                    actual: Decimal::from(count),
                    limit: Decimal::from(limits.min_pharmacists),
                    unit: MeasureUnit::Pharmacists,
                },
                message: format!(
                    "{} pharmacien(s) planifié(s) le {}, minimum requis : {}",
                    count,
                    date.format("%d/%m/%Y"),
                    limits.min_pharmacists
                ),
            });
            DailyCoverage {
                date,
                pharmacist_count: count,
                breach,
            }
        })
        .collect()
}
