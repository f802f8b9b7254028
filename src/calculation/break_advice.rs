//! Break placement advice.
//!
//! Recommends a break centred on a slot. Accepting the advice only changes
//! the candidate's break duration; the placement is informational.

use serde::{Deserialize, Serialize};

use crate::config::{BreakAdviceConfig, LegalLimits};
use crate::models::{CandidateSlot, TimeOfDay};

use super::time_arithmetic::{duration, round_to_quarter, shift_time};

/// A break recommendation for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakAdvice {
    /// True when the slot is long enough to warrant a break.
    pub should_suggest: bool,
    /// Recommended break length; zero when no break is suggested.
    pub break_duration_minutes: u32,
    /// Recommended break start.
    pub break_start: TimeOfDay,
    /// Recommended break end.
    pub break_end: TimeOfDay,
}

impl BreakAdvice {
    /// Applies the advice to a candidate by setting its break duration.
    ///
    /// Does nothing when no break is suggested.
    pub fn apply_to(&self, candidate: &mut CandidateSlot) {
        if self.should_suggest {
            candidate.break_duration_minutes = self.break_duration_minutes;
        }
    }
}

/// Advises a break for the slot `[start, end)`.
///
/// A break is suggested from `threshold_minutes` of slot length. Its length
/// comes from the longest matching tier, falling back to
/// `break_duration_minutes` from the legal limits. The break is centred on
/// the slot's midpoint, its start rounded to the quarter hour and then
/// clamped so the whole break stays inside the slot.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::advise_break;
/// use shift_engine::config::{BreakAdviceConfig, LegalLimits};
///
/// let start = "08:30".parse().unwrap();
/// let end = "17:00".parse().unwrap();
/// let advice = advise_break(start, end, &BreakAdviceConfig::default(), &LegalLimits::default());
///
/// assert!(advice.should_suggest);
/// assert_eq!(advice.break_duration_minutes, 30);
/// assert_eq!(advice.break_start.to_string(), "12:30");
/// assert_eq!(advice.break_end.to_string(), "13:00");
/// ```
pub fn advise_break(
    start: TimeOfDay,
    end: TimeOfDay,
    config: &BreakAdviceConfig,
    limits: &LegalLimits,
) -> BreakAdvice {
    let slot_minutes = duration(start, end);
    let midpoint = if slot_minutes > 0 {
        shift_time(start, slot_minutes / 2)
    } else {
        start
    };

    if slot_minutes < i64::from(config.threshold_minutes) {
        return BreakAdvice {
            should_suggest: false,
            break_duration_minutes: 0,
            break_start: midpoint,
            break_end: midpoint,
        };
    }

    let break_minutes = config
        .tiers
        .iter()
        .filter(|tier| i64::from(tier.min_slot_minutes) <= slot_minutes)
        .max_by_key(|tier| tier.min_slot_minutes)
        .map(|tier| tier.break_minutes)
        .unwrap_or(limits.break_duration_minutes)
        .min(u32::try_from(slot_minutes).unwrap_or(u32::MAX));
    let length = i64::from(break_minutes);

    let centred = round_to_quarter(shift_time(midpoint, -(length / 2)));
    let latest = shift_time(end, -length).max(start);
    let break_start = centred.max(start).min(latest);

    BreakAdvice {
        should_suggest: true,
        break_duration_minutes: break_minutes,
        break_start,
        break_end: shift_time(break_start, length).min(end),
    }
}
