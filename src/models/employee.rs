//! Employee model and related types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The role an employee holds in the pharmacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// A licensed pharmacist; counts toward minimum pharmacist coverage.
    Pharmacist,
    /// A pharmacy technician (préparateur).
    Preparer,
    /// An apprentice technician.
    Apprentice,
    /// A pharmacy student.
    Student,
}

/// A member of the pharmacy staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// The employee's role.
    pub role: EmployeeRole,
    /// Contracted weekly hours; the configured overtime base applies when absent.
    #[serde(default)]
    pub weekly_contract_hours: Option<Decimal>,
    /// Inactive employees are left out of compliance reports.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns true if the employee is a pharmacist.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_engine::models::{Employee, EmployeeRole};
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Claire".to_string(),
    ///     last_name: "Martin".to_string(),
    ///     role: EmployeeRole::Pharmacist,
    ///     weekly_contract_hours: None,
    ///     is_active: true,
    /// };
    /// assert!(employee.is_pharmacist());
    /// ```
    pub fn is_pharmacist(&self) -> bool {
        self.role == EmployeeRole::Pharmacist
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
