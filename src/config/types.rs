//! Configuration types for scheduling rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from a tenant's YAML configuration files. Every limit the
//! rules check against lives here; rule code never hardcodes a threshold.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::TimeOfDay;

/// Tenant-configurable labour-time limits.
///
/// Loaded from `legal_limits.yaml`; HTTP callers may also send their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalLimits {
    /// Maximum effective hours in one day.
    pub max_daily_hours: Decimal,
    /// Weekly hours target; exceeding it is a warning.
    pub max_weekly_hours: Decimal,
    /// Required uninterrupted rest within a week, in hours.
    pub min_rest_hours_weekly: Decimal,
    /// Minimum number of pharmacists scheduled on each opening day.
    pub min_pharmacists: u32,
    /// Whether a break is mandatory on long shifts.
    pub break_required: bool,
    /// Effective hours from which a break is expected.
    pub break_threshold_hours: Decimal,
    /// Minimum break length on long shifts, in minutes.
    pub break_duration_minutes: u32,
}

impl Default for LegalLimits {
    fn default() -> Self {
        Self {
            max_daily_hours: Decimal::new(10, 0),
            max_weekly_hours: Decimal::new(35, 0),
            min_rest_hours_weekly: Decimal::new(35, 0),
            min_pharmacists: 1,
            break_required: true,
            break_threshold_hours: Decimal::new(6, 0),
            break_duration_minutes: 20,
        }
    }
}

impl LegalLimits {
    /// Rejects limits no schedule could satisfy.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_positive("max_daily_hours", self.max_daily_hours)?;
        ensure_positive("max_weekly_hours", self.max_weekly_hours)?;
        ensure_positive("break_threshold_hours", self.break_threshold_hours)?;
        if self.max_daily_hours > Decimal::new(24, 0) {
            return Err(invalid("max_daily_hours", "cannot exceed 24 hours"));
        }
        if self.max_weekly_hours > Decimal::new(7 * 24, 0) {
            return Err(invalid("max_weekly_hours", "cannot exceed 168 hours"));
        }
        if self.break_threshold_hours > Decimal::new(24, 0) {
            return Err(invalid("break_threshold_hours", "cannot exceed 24 hours"));
        }
        if self.min_rest_hours_weekly < Decimal::ZERO
            || self.min_rest_hours_weekly > Decimal::new(7 * 24, 0)
        {
            return Err(invalid("min_rest_hours_weekly", "must be within 0..168 hours"));
        }
        Ok(())
    }
}

/// Pharmacy-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacyConfig {
    /// Display name of the pharmacy.
    pub name: String,
    /// Tenant identifier stamped on created shifts.
    #[serde(default)]
    pub organization_id: Option<String>,
    /// Days the pharmacy opens; pharmacist coverage is checked on these.
    pub open_days: Vec<Weekday>,
}

impl Default for PharmacyConfig {
    fn default() -> Self {
        Self {
            name: "Pharmacie".to_string(),
            organization_id: None,
            open_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
            ],
        }
    }
}

/// Where an availability window is split into morning and afternoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitRule {
    /// The window's midpoint, rounded to the quarter hour.
    Midpoint,
    /// A fixed clock boundary, e.g. 14:00.
    Fixed {
        /// The boundary time.
        boundary: TimeOfDay,
    },
}

/// Slot suggestion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// How to split the window.
    pub split_rule: SplitRule,
    /// Minimum length of each half for morning/afternoon to be offered.
    pub min_half_minutes: u32,
    /// Length of the custom suggestion.
    pub custom_duration_minutes: u32,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            split_rule: SplitRule::Midpoint,
            min_half_minutes: 120,
            custom_duration_minutes: 240,
        }
    }
}

/// One step of the slot length to break length mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakTier {
    /// Slots at least this long use this tier.
    pub min_slot_minutes: u32,
    /// Recommended break length.
    pub break_minutes: u32,
}

/// Break advisor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakAdviceConfig {
    /// Slot length from which a break is suggested.
    pub threshold_minutes: u32,
    /// Slot length to break length mapping; the longest matching tier wins.
    pub tiers: Vec<BreakTier>,
}

impl Default for BreakAdviceConfig {
    fn default() -> Self {
        Self {
            threshold_minutes: 360,
            tiers: vec![
                BreakTier {
                    min_slot_minutes: 360,
                    break_minutes: 20,
                },
                BreakTier {
                    min_slot_minutes: 480,
                    break_minutes: 30,
                },
            ],
        }
    }
}

/// Overtime band settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeConfig {
    /// Weekly hours before overtime, for employees without contract hours.
    pub base_weekly_hours: Decimal,
    /// Width of the first overtime band; hours beyond it fall in the second band.
    pub first_band_hours: Decimal,
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            base_weekly_hours: Decimal::new(35, 0),
            first_band_hours: Decimal::new(8, 0),
        }
    }
}

/// Scheduling policy loaded from `scheduling.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Slot suggestion settings.
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    /// Break advisor settings.
    #[serde(default)]
    pub break_advice: BreakAdviceConfig,
    /// Overtime band settings.
    #[serde(default)]
    pub overtime: OvertimeConfig,
}

impl SchedulingConfig {
    /// Rejects settings the generators cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.suggestions.custom_duration_minutes == 0 {
            return Err(invalid(
                "suggestions.custom_duration_minutes",
                "must be positive",
            ));
        }
        if self.break_advice.threshold_minutes == 0 {
            return Err(invalid("break_advice.threshold_minutes", "must be positive"));
        }
        if self.break_advice.tiers.iter().any(|t| t.break_minutes == 0) {
            return Err(invalid("break_advice.tiers", "break_minutes must be positive"));
        }
        ensure_positive("overtime.base_weekly_hours", self.overtime.base_weekly_hours)?;
        if self.overtime.first_band_hours < Decimal::ZERO {
            return Err(invalid("overtime.first_band_hours", "cannot be negative"));
        }
        Ok(())
    }
}

/// The complete configuration of one tenant.
///
/// Aggregates everything loaded from a configuration directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    legal_limits: LegalLimits,
    pharmacy: PharmacyConfig,
    scheduling: SchedulingConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        legal_limits: LegalLimits,
        pharmacy: PharmacyConfig,
        scheduling: SchedulingConfig,
    ) -> Self {
        Self {
            legal_limits,
            pharmacy,
            scheduling,
        }
    }

    /// Returns the legal limits.
    pub fn legal_limits(&self) -> &LegalLimits {
        &self.legal_limits
    }

    /// Returns the pharmacy settings.
    pub fn pharmacy(&self) -> &PharmacyConfig {
        &self.pharmacy
    }

    /// Returns the scheduling policy.
    pub fn scheduling(&self) -> &SchedulingConfig {
        &self.scheduling
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn ensure_positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(invalid(field, "must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_are_valid() {
        assert!(LegalLimits::default().validate().is_ok());
        assert!(SchedulingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_daily_hours_rejected() {
        let limits = LegalLimits {
            max_daily_hours: Decimal::ZERO,
            ..LegalLimits::default()
        };
        match limits.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "max_daily_hours"),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_rest_longer_than_a_week_rejected() {
        let limits = LegalLimits {
            min_rest_hours_weekly: Decimal::new(200, 0),
            ..LegalLimits::default()
        };
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_weekly_hours_above_a_week_rejected() {
        let limits = LegalLimits {
            max_weekly_hours: Decimal::MAX,
            ..LegalLimits::default()
        };
        match limits.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "max_weekly_hours"),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }

        let limits = LegalLimits {
            max_weekly_hours: Decimal::new(168, 0),
            ..LegalLimits::default()
        };
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_break_threshold_above_a_day_rejected() {
        let limits = LegalLimits {
            break_threshold_hours: Decimal::new(25, 0),
            ..LegalLimits::default()
        };
        match limits.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "break_threshold_hours")
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_break_tier_rejected() {
        let mut config = SchedulingConfig::default();
        config.break_advice.tiers.push(BreakTier {
            min_slot_minutes: 600,
            break_minutes: 0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_split_rule_deserialization() {
        let midpoint: SplitRule = serde_json::from_str(r#"{"kind":"midpoint"}"#).unwrap();
        assert_eq!(midpoint, SplitRule::Midpoint);

        let fixed: SplitRule =
            serde_json::from_str(r#"{"kind":"fixed","boundary":"14:00"}"#).unwrap();
        assert_eq!(
            fixed,
            SplitRule::Fixed {
                boundary: "14:00".parse().unwrap()
            }
        );
    }

    #[test]
    fn test_legal_limits_from_json_numbers() {
        let json = r#"{
            "max_daily_hours": 10,
            "max_weekly_hours": 35,
            "min_rest_hours_weekly": 35,
            "min_pharmacists": 2,
            "break_required": true,
            "break_threshold_hours": 6,
            "break_duration_minutes": 20
        }"#;

        let limits: LegalLimits = serde_json::from_str(json).unwrap();
        assert_eq!(limits.max_daily_hours, Decimal::new(10, 0));
        assert_eq!(limits.min_pharmacists, 2);
    }

    #[test]
    fn test_scheduling_sections_default_when_missing() {
        let config: SchedulingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SchedulingConfig::default());
    }
}
