//! Quick-assign session state.
//!
//! A [`QuickAssignSession`] holds what the assignment panel shows for one
//! employee and date: the generated suggestions, the input mode, the
//! candidate being edited and the latest validation. Every change re-runs
//! the pure rules; the session never feeds its own state into them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::{
    BreakAdvice, SuggestedSlot, advise_break, generate_suggestions, minutes_to_hours,
    validate_slot,
};
use crate::config::{EngineConfig, LegalLimits, SchedulingConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AvailabilityWindow, CandidateSlot, ExistingShift, ShiftCreation, ShiftType, SlotOrigin,
    SuggestionKind, TimeOfDay, ValidationResult,
};

/// How the candidate is currently being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// The candidate mirrors a selected suggestion.
    Suggestion,
    /// The candidate was typed in by hand.
    Manual,
}

/// Editing state for assigning one shift.
///
/// # Example
///
/// ```
/// use shift_engine::config::EngineConfig;
/// use shift_engine::models::{AvailabilityWindow, Interval, SuggestionKind};
/// use shift_engine::session::{InputMode, QuickAssignSession};
/// use chrono::NaiveDate;
///
/// let availability = AvailabilityWindow {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     interval: Interval::parse("08:30", "20:30").unwrap(),
/// };
/// let mut session = QuickAssignSession::new(availability, vec![], &EngineConfig::default());
/// assert_eq!(session.mode(), InputMode::Suggestion);
///
/// session.select_suggestion(SuggestionKind::Morning).unwrap();
/// let shift = session.confirm().unwrap();
/// assert_eq!(shift.start_time.to_string(), "08:30");
/// assert_eq!(shift.end_time.to_string(), "14:30");
/// ```
#[derive(Debug, Clone)]
pub struct QuickAssignSession {
    availability: AvailabilityWindow,
    existing_shifts: Vec<ExistingShift>,
    limits: LegalLimits,
    scheduling: SchedulingConfig,
    organization_id: Option<String>,
    suggestions: Vec<SuggestedSlot>,
    mode: InputMode,
    selected: Option<SuggestionKind>,
    candidate: CandidateSlot,
    validation: ValidationResult,
    break_advice: BreakAdvice,
}

impl QuickAssignSession {
    /// Opens a session, seeded from the first valid suggestion.
    ///
    /// When every suggestion is invalid the candidate covers the whole
    /// window in manual mode, so the validator explains the conflict.
    pub fn new(
        availability: AvailabilityWindow,
        existing_shifts: Vec<ExistingShift>,
        config: &EngineConfig,
    ) -> Self {
        let scheduling = config.scheduling().clone();
        let limits = config.legal_limits().clone();
        let suggestions =
            generate_suggestions(&availability, &existing_shifts, &scheduling.suggestions);

        let (mode, selected, candidate) = match suggestions.iter().find(|s| s.is_valid) {
            Some(first) => (
                InputMode::Suggestion,
                Some(first.id),
                CandidateSlot::from_interval(
                    first.interval,
                    SlotOrigin::Suggestion {
                        suggestion_id: first.id,
                    },
                ),
            ),
            None => (
                InputMode::Manual,
                None,
                CandidateSlot::from_interval(availability.interval, SlotOrigin::Manual),
            ),
        };

        let validation = validate_slot(&candidate, &availability, &existing_shifts, &limits);
        let break_advice = advise_break(
            candidate.start,
            candidate.end,
            &scheduling.break_advice,
            &limits,
        );

        Self {
            availability,
            existing_shifts,
            limits,
            scheduling,
            organization_id: config.pharmacy().organization_id.clone(),
            suggestions,
            mode,
            selected,
            candidate,
            validation,
            break_advice,
        }
    }

    /// The generated suggestions, in display order.
    pub fn suggestions(&self) -> &[SuggestedSlot] {
        &self.suggestions
    }

    /// The current input mode.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// The selected suggestion, in suggestion mode.
    pub fn selected_suggestion(&self) -> Option<SuggestionKind> {
        self.selected
    }

    /// The candidate being edited.
    pub fn candidate(&self) -> &CandidateSlot {
        &self.candidate
    }

    /// Validation of the current candidate.
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// Break advice for the current candidate.
    pub fn break_advice(&self) -> &BreakAdvice {
        &self.break_advice
    }

    /// Replaces the candidate with a generated suggestion.
    ///
    /// Invalid suggestions can be selected; the validation then reports why.
    pub fn select_suggestion(&mut self, kind: SuggestionKind) -> EngineResult<()> {
        let slot = self
            .suggestions
            .iter()
            .find(|s| s.id == kind)
            .ok_or_else(|| EngineError::UnknownSuggestion {
                id: kind.as_str().to_string(),
            })?;

        self.candidate = CandidateSlot::from_interval(
            slot.interval,
            SlotOrigin::Suggestion { suggestion_id: kind },
        );
        self.mode = InputMode::Suggestion;
        self.selected = Some(kind);
        self.refresh();
        Ok(())
    }

    /// Sets the candidate start by hand, switching to manual mode.
    pub fn set_start(&mut self, start: TimeOfDay) {
        self.candidate.start = start;
        self.switch_to_manual();
    }

    /// Sets the candidate end by hand, switching to manual mode.
    pub fn set_end(&mut self, end: TimeOfDay) {
        self.candidate.end = end;
        self.switch_to_manual();
    }

    /// Sets the planned break.
    pub fn set_break(&mut self, minutes: u32) {
        self.candidate.break_duration_minutes = minutes;
        self.refresh();
    }

    /// Applies the current break advice to the candidate.
    pub fn accept_break_advice(&mut self) {
        self.break_advice.apply_to(&mut self.candidate);
        self.refresh();
    }

    /// Builds the shift-creation payload for the current candidate.
    ///
    /// Fails with [`EngineError::ConfirmationBlocked`] while the candidate
    /// carries blocking errors. Warnings do not block.
    pub fn confirm(&self) -> EngineResult<ShiftCreation> {
        if !self.validation.is_valid {
            let codes: Vec<&str> = self
                .validation
                .errors
                .iter()
                .map(|issue| issue.code.as_str())
                .collect();
            return Err(EngineError::ConfirmationBlocked {
                error_count: codes.len(),
                codes: codes.join(", "),
            });
        }

        let creation = ShiftCreation {
            organization_id: self.organization_id.clone(),
            employee_id: self.availability.employee_id.clone(),
            date: self.availability.date,
            start_time: self.candidate.start,
            end_time: self.candidate.end,
            break_duration: self.candidate.break_duration_minutes,
            hours: minutes_to_hours(self.candidate.effective_minutes()),
            shift_type: self.confirmed_shift_type(),
            validated: false,
        };

        debug!(
            employee_id = %creation.employee_id,
            date = %creation.date,
            start = %creation.start_time,
            end = %creation.end_time,
            shift_type = %creation.shift_type,
            "Confirmed quick-assign slot"
        );

        Ok(creation)
    }

    /// A second work shift on the same date is a split shift; otherwise the
    /// suggestion decides, and manual slots are regular.
    fn confirmed_shift_type(&self) -> ShiftType {
        let has_work_that_day = self.existing_shifts.iter().any(|shift| {
            shift.employee_id == self.availability.employee_id
                && shift.date == self.availability.date
                && shift.is_work_shift()
        });
        if has_work_that_day {
            return ShiftType::Split;
        }

        match self.candidate.origin {
            SlotOrigin::Suggestion {
                suggestion_id: SuggestionKind::Morning,
            } => ShiftType::Morning,
            SlotOrigin::Suggestion {
                suggestion_id: SuggestionKind::Afternoon,
            } => ShiftType::Afternoon,
            _ => ShiftType::Regular,
        }
    }

    fn switch_to_manual(&mut self) {
        self.mode = InputMode::Manual;
        self.selected = None;
        self.candidate.origin = SlotOrigin::Manual;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.validation = validate_slot(
            &self.candidate,
            &self.availability,
            &self.existing_shifts,
            &self.limits,
        );
        self.break_advice = advise_break(
            self.candidate.start,
            self.candidate.end,
            &self.scheduling.break_advice,
            &self.limits,
        );
    }
}
