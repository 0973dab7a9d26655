//! Error types and handling
//!
//! This module contains the error taxonomy for the simulation. Every variant
//! is fatal for the operation that raised it: configuration problems surface
//! immediately, labeling a too-small table is rejected, and a broken trip
//! state indicates a generator bug rather than a condition to clamp away.
//! Out-of-range sampled values are expected distribution-tail events and are
//! clamped at the sampling sites, never reported through this type.

use crate::types::EmployeeId;
use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Malformed or missing configuration (unknown group code, bad parameters)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The labeling stage was invoked on a table too small for percentile
    /// computation
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A TripState invariant was violated; indicates a generator bug
    #[error("Trip state inconsistency for {employee_id}: {reason}")]
    StateConsistency {
        /// Employee whose trip state broke
        employee_id: EmployeeId,
        /// What went wrong
        reason: String,
    },

    /// I/O error from the export surface
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error from the export surface
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an insufficient-data error
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    /// Create a trip-state inconsistency error
    pub fn state_consistency(employee_id: EmployeeId, reason: impl Into<String>) -> Self {
        Self::StateConsistency { employee_id, reason: reason.into() }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "Configuration",
            Self::InsufficientData(_) => "Insufficient Data",
            Self::StateConsistency { .. } => "State Consistency",
            Self::Io(_) => "IO",
            Self::Serialization(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
