//! Enumeration types for the insider-threat simulator
//!
//! This module contains the behavioral group codes and the detection tier
//! used by the daily labeling stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse behavioral category an employee belongs to.
///
/// Each group carries its own activity-distribution parameters in the
/// behavioral pattern table (work hours, print/burn rates, travel
/// probability, off-hours tendency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BehavioralGroup {
    /// Executive management
    A,
    /// Developers and engineers
    B,
    /// Office workers and secretaries
    C,
    /// Marketing and business development
    D,
    /// Security personnel
    E,
    /// IT staff
    F,
}

impl BehavioralGroup {
    /// All groups in stable order
    pub fn all() -> [BehavioralGroup; 6] {
        [Self::A, Self::B, Self::C, Self::D, Self::E, Self::F]
    }

    /// Human-readable description of the group
    pub fn description(&self) -> &'static str {
        match self {
            Self::A => "Executive Management",
            Self::B => "Developers & Engineers",
            Self::C => "Office Workers & Secretaries",
            Self::D => "Marketing & Business Development",
            Self::E => "Security Personnel",
            Self::F => "IT Staff",
        }
    }
}

impl fmt::Display for BehavioralGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::E => write!(f, "E"),
            Self::F => write!(f, "F"),
        }
    }
}

impl FromStr for BehavioralGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            _ => Err(format!("Unknown behavioral group: {}", s)),
        }
    }
}

/// Confidence tier of a day-level suspicion label.
///
/// `Strict` corresponds to the 95th-percentile score threshold, `Soft` to the
/// 75th-percentile threshold (and to injected false positives).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectionTier {
    /// Not flagged
    #[default]
    None,
    /// Flagged at the soft (75th percentile) threshold
    Soft,
    /// Flagged at the strict (95th percentile) threshold
    Strict,
}

impl fmt::Display for DetectionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Soft => write!(f, "soft"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for DetectionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "soft" => Ok(Self::Soft),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("Unknown detection tier: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_round_trip() {
        for group in BehavioralGroup::all() {
            let parsed: BehavioralGroup = group.to_string().parse().unwrap();
            assert_eq!(parsed, group);
        }
    }

    #[test]
    fn test_group_from_str_rejects_unknown() {
        assert!("G".parse::<BehavioralGroup>().is_err());
        assert!("".parse::<BehavioralGroup>().is_err());
    }

    #[test]
    fn test_group_descriptions() {
        assert_eq!(BehavioralGroup::A.description(), "Executive Management");
        assert_eq!(BehavioralGroup::E.description(), "Security Personnel");
    }

    #[test]
    fn test_detection_tier_serde_form() {
        let json = serde_json::to_string(&DetectionTier::Strict).unwrap();
        assert_eq!(json, "\"strict\"");
        let parsed: DetectionTier = serde_json::from_str("\"soft\"").unwrap();
        assert_eq!(parsed, DetectionTier::Soft);
    }

    #[test]
    fn test_detection_tier_default_is_none() {
        assert_eq!(DetectionTier::default(), DetectionTier::None);
    }
}
