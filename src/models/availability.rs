//! Availability window model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::Interval;

/// An employee's declared availability for one date.
///
/// Produced by the availability-submission flow; read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// The employee who declared the window.
    pub employee_id: String,
    /// The date the window applies to.
    pub date: NaiveDate,
    /// The available interval.
    pub interval: Interval,
}
