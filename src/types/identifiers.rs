//! Identifier types for the insider-threat simulator
//!
//! This module contains the employee identifier used as the primary key of
//! the activity and label tables, and the run identifier that tags one
//! generation run in logs and export metadata.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an employee.
///
/// Employee ids are index-based rather than random so that seeded runs are
/// fully reproducible and tables sort deterministically. The wire form is
/// `EMP#####` (zero-padded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmployeeId(pub u32);

impl EmployeeId {
    /// Create an employee ID from a stable index (1-based in the wire form)
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// The underlying index
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EMP{:05}", self.0)
    }
}

impl Serialize for EmployeeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("EMP").unwrap_or(&s);
        let index = digits
            .parse::<u32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid employee id {:?}: {}", s, e)))?;
        Ok(EmployeeId(index))
    }
}

/// Unique identifier for a single generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RUN_{}", self.0.simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_id_display() {
        assert_eq!(EmployeeId::from_index(1).to_string(), "EMP00001");
        assert_eq!(EmployeeId::from_index(1666).to_string(), "EMP01666");
    }

    #[test]
    fn test_employee_id_ordering() {
        let a = EmployeeId::from_index(3);
        let b = EmployeeId::from_index(12);
        assert!(a < b);
    }

    #[test]
    fn test_employee_id_serde_round_trip() {
        let id = EmployeeId::from_index(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"EMP00042\"");

        let parsed: EmployeeId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_employee_id_deserialize_bare_index() {
        let parsed: EmployeeId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(parsed, EmployeeId::from_index(7));
    }

    #[test]
    fn test_run_id_uniqueness() {
        let a = RunId::new();
        let b = RunId::new();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("RUN_"));
    }
}
