//! Core types for the insider-threat simulator
//!
//! This module contains identifiers, enumerations, and configuration types
//! used throughout the simulation system.

pub mod config;
pub mod enums;
pub mod identifiers;

pub use config::{
    off_hours, CliArgs, ConfigError, ConfigFile, ConfigValidationError, FalsePositiveRounding,
    NoiseRates, SimulationConfig,
};
pub use enums::{BehavioralGroup, DetectionTier};
pub use identifiers::{EmployeeId, RunId};
