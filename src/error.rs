//! Error types for the shift engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Rule outcomes (overlaps, exceeded limits, missing breaks) are never errors:
//! they are returned as data in a `ValidationResult` or `ComplianceReport`.
//! `EngineError` is reserved for upstream data bugs and configuration problems.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the shift engine.
///
/// # Example
///
/// ```
/// use shift_engine::error::EngineError;
///
/// let error = EngineError::TimeParse {
///     input: "25:00".to_string(),
///     message: "hour must be below 24".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time '25:00': hour must be below 24");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A wall-clock time string could not be parsed as `HH:MM`.
    #[error("Invalid time '{input}': {message}")]
    TimeParse {
        /// The offending input.
        input: String,
        /// A description of the parse failure.
        message: String,
    },

    /// An interval whose end is not after its start.
    #[error("Invalid interval {start}-{end}: end must be after start")]
    InvalidInterval {
        /// The interval start, formatted `HH:MM`.
        start: String,
        /// The interval end, formatted `HH:MM`.
        end: String,
    },

    /// A shift record was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A reporting period that is inverted or longer than a week.
    #[error("Invalid week period {start} to {end}: {message}")]
    InvalidWeek {
        /// The first day of the period.
        start: NaiveDate,
        /// The last day of the period.
        end: NaiveDate,
        /// Why the period was rejected.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The quick-assign session was asked for a suggestion it never produced.
    #[error("Unknown suggestion: {id}")]
    UnknownSuggestion {
        /// The requested suggestion id.
        id: String,
    },

    /// Confirmation was requested while the candidate still carries blocking errors.
    #[error("Cannot confirm slot: {error_count} blocking error(s) ({codes})")]
    ConfirmationBlocked {
        /// Number of blocking errors.
        error_count: usize,
        /// Comma-separated error codes.
        codes: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
