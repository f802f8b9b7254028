//! Slot suggestion generation.
//!
//! Turns an availability window into a short, fixed-order list of candidate
//! slots the user can pick from in the quick-assign panel.

use serde::{Deserialize, Serialize};

use crate::config::{SplitRule, SuggestionConfig};
use crate::models::{AvailabilityWindow, ExistingShift, Interval, SuggestionKind, TimeOfDay};

use super::time_arithmetic::{round_to_quarter, shift_time};

/// A generated candidate slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedSlot {
    /// Stable suggestion id.
    pub id: SuggestionKind,
    /// Display label.
    pub label: String,
    /// Display icon.
    pub icon: String,
    /// The proposed interval, always inside the availability window.
    pub interval: Interval,
    /// Length of the interval in minutes.
    pub duration_minutes: i64,
    /// False when the slot overlaps a work shift of the same employee and date.
    pub is_valid: bool,
    /// Why the slot is invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
    /// True for the slot the user is expected to fine-tune by hand.
    pub adjustable: bool,
}

impl SuggestionKind {
    /// The display label of the suggestion.
    pub fn label(self) -> &'static str {
        match self {
            SuggestionKind::Full => "Journée",
            SuggestionKind::Morning => "Matin",
            SuggestionKind::Afternoon => "Après-midi",
            SuggestionKind::Custom => "Personnalisé",
        }
    }

    /// The display icon of the suggestion.
    pub fn icon(self) -> &'static str {
        match self {
            SuggestionKind::Full => "🌞",
            SuggestionKind::Morning => "🌅",
            SuggestionKind::Afternoon => "🌇",
            SuggestionKind::Custom => "✏️",
        }
    }
}

/// Generates suggestions for one availability window.
///
/// The output order is always Full, Morning, Afternoon, Custom, regardless
/// of duration or validity. Morning and Afternoon are only emitted together,
/// when the split point lies strictly inside the window and both halves are
/// at least `min_half_minutes` long. Invalid suggestions are still returned,
/// flagged with the reason.
///
/// Leave and training entries never make a suggestion invalid.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::generate_suggestions;
/// use shift_engine::config::SuggestionConfig;
/// use shift_engine::models::{AvailabilityWindow, Interval, SuggestionKind};
/// use chrono::NaiveDate;
///
/// let window = AvailabilityWindow {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     interval: Interval::parse("08:30", "20:30").unwrap(),
/// };
///
/// let slots = generate_suggestions(&window, &[], &SuggestionConfig::default());
/// let ids: Vec<_> = slots.iter().map(|s| s.id).collect();
/// assert_eq!(
///     ids,
///     vec![
///         SuggestionKind::Full,
///         SuggestionKind::Morning,
///         SuggestionKind::Afternoon,
///         SuggestionKind::Custom,
///     ]
/// );
/// ```
pub fn generate_suggestions(
    availability: &AvailabilityWindow,
    existing_shifts: &[ExistingShift],
    config: &SuggestionConfig,
) -> Vec<SuggestedSlot> {
    let window = availability.interval;
    let blocking: Vec<&ExistingShift> = existing_shifts
        .iter()
        .filter(|shift| {
            shift.employee_id == availability.employee_id
                && shift.date == availability.date
                && shift.is_work_shift()
        })
        .collect();

    let mut slots = Vec::with_capacity(4);
    slots.push(build_slot(SuggestionKind::Full, window, &blocking));

    if let Some((morning, afternoon)) = split_window(window, config) {
        slots.push(build_slot(SuggestionKind::Morning, morning, &blocking));
        slots.push(build_slot(SuggestionKind::Afternoon, afternoon, &blocking));
    }

    let custom_end = shift_time(window.start(), i64::from(config.custom_duration_minutes))
        .min(window.end());
    if let Ok(custom) = Interval::new(window.start(), custom_end) {
        let mut slot = build_slot(SuggestionKind::Custom, custom, &blocking);
        slot.adjustable = true;
        slots.push(slot);
    }

    slots
}

/// The morning/afternoon split point of a window, per the configured rule.
pub fn split_point(window: Interval, rule: SplitRule) -> TimeOfDay {
    match rule {
        SplitRule::Midpoint => round_to_quarter(shift_time(
            window.start(),
            window.duration_minutes() / 2,
        )),
        SplitRule::Fixed { boundary } => boundary,
    }
}

fn split_window(window: Interval, config: &SuggestionConfig) -> Option<(Interval, Interval)> {
    let split = split_point(window, config.split_rule);
    let min_half = i64::from(config.min_half_minutes);

    let morning = Interval::new(window.start(), split).ok()?;
    let afternoon = Interval::new(split, window.end()).ok()?;
    if morning.duration_minutes() < min_half || afternoon.duration_minutes() < min_half {
        return None;
    }
    Some((morning, afternoon))
}

fn build_slot(kind: SuggestionKind, interval: Interval, blocking: &[&ExistingShift]) -> SuggestedSlot {
    let conflict = blocking
        .iter()
        .find(|shift| shift.interval.overlaps(&interval));

    SuggestedSlot {
        id: kind,
        label: kind.label().to_string(),
        icon: kind.icon().to_string(),
        interval,
        duration_minutes: interval.duration_minutes(),
        is_valid: conflict.is_none(),
        invalid_reason: conflict.map(|shift| {
            format!("Chevauche le créneau existant {}", shift.interval)
        }),
        adjustable: false,
    }
}
