//! Employee profiles
//!
//! The static, immutable per-employee attributes the simulation consumes.
//! A profile never changes during a run; in particular `is_malicious` is the
//! employee-level ground truth fixed for the whole lifecycle.

use crate::types::{BehavioralGroup, EmployeeId};
use serde::{Deserialize, Serialize};

/// Static attributes of one simulated employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier
    pub employee_id: EmployeeId,
    /// Department name
    pub department: String,
    /// Home campus
    pub campus: String,
    /// Job position
    pub position: String,
    /// Years in the role
    pub seniority_years: u32,
    /// Security clearance level (1-4)
    pub classification_level: u8,
    /// Behavioral group driving the activity distributions
    pub behavioral_group: BehavioralGroup,
    /// Country of origin
    pub origin_country: String,
    /// Ground-truth maliciousness, fixed for the employee's whole lifecycle
    pub is_malicious: bool,
}

impl EmployeeProfile {
    /// Whether the employee holds a high clearance (level 3 or 4)
    pub fn has_high_clearance(&self) -> bool {
        self.classification_level >= 3
    }
}
