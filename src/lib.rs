//! Insider Threat Simulator
//!
//! A synthetic behavioral dataset generator for insider-threat research. It
//! simulates multi-month employee activity (building access, printing,
//! document destruction, travel) day by day, derives composite risk flags,
//! converts the employee-level ground truth into day-level suspicion labels,
//! and optionally perturbs the finished table with consistency-preserving
//! noise.
//!
//! # Overview
//!
//! Six behavioral groups drive all activity distributions through a single
//! pattern table; employees carrying the malicious ground truth get wider,
//! heavier-tailed variants of their group's parameters through one shared
//! override record. The output is a complete (employee x date) activity grid
//! plus a parallel label table, both exportable as JSONL.
//!
//! ## Pipeline
//!
//! ```text
//! EmployeeProfile map
//!        |
//!        v
//! SimulationOrchestrator ---- travel state threaded day by day
//!        |                    (access, print, burn gated on abroad status)
//!        v
//! activity table (one row per employee-day)
//!        |
//!        v
//! DailyLabelCreator -------- percentile thresholds over the whole table,
//!        |                   strict/soft tiers, false-positive injection
//!        v
//! label table
//!        |
//!        v
//! NoiseInjector (optional) -- bounded deltas, dependent fields recomputed
//! ```
//!
//! The labeling stage is the pipeline's only synchronization barrier: its
//! thresholds need the complete table. Generation is independent across
//! employees (but chronological within one employee), and noise is
//! independent across rows.
//!
//! ## Quick Start
//!
//! ```rust
//! use insider_threat_simulator::employee::EmployeeGenerator;
//! use insider_threat_simulator::labeling::DailyLabelCreator;
//! use insider_threat_simulator::simulation::SimulationOrchestrator;
//! use insider_threat_simulator::types::SimulationConfig;
//!
//! let config = SimulationConfig {
//!     employee_count: 10,
//!     days: 30,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let employees = EmployeeGenerator::new(config.seed).generate(&config)?;
//! let mut orchestrator = SimulationOrchestrator::new(config.clone(), employees)?;
//! let records = orchestrator.run()?;
//! let labels = DailyLabelCreator::new(&config).create(&records)?;
//! assert_eq!(labels.len(), records.len());
//! # Ok::<(), insider_threat_simulator::simulation::SimulationError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, enums, and configuration
//! - [`patterns`]: behavioral pattern table and geographic data
//! - [`employee`]: employee profiles and population generation
//! - [`activity`]: the four activity generators and the risk composer
//! - [`simulation`]: orchestrator, statistics, logging, errors
//! - [`labeling`]: scoring, thresholds, and daily label creation
//! - [`noise`]: consistency-preserving noise injection
//! - [`export`]: JSONL export of the run outputs
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod activity;
pub mod employee;
pub mod export;
pub mod labeling;
pub mod noise;
pub mod patterns;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    BehavioralGroup,
    ConfigValidationError,
    DetectionTier,
    EmployeeId,
    FalsePositiveRounding,
    NoiseRates,
    RunId,
    SimulationConfig,
};

// Employee modeling
pub use employee::{EmployeeGenerator, EmployeeProfile};

// Patterns
pub use patterns::PatternTable;

// Activity generation
pub use activity::{
    AccessActivity, AccessActivityGenerator, BurnActivity, BurnActivityGenerator,
    DailyActivityRecord, PrintActivity, PrintActivityGenerator, TravelActivity,
    TravelActivityGenerator, TripState,
};

// Simulation control
pub use simulation::{
    GenerationStatistics, LoggingConfig, SimulationError, SimulationOrchestrator, SimulationResult,
};

// Labeling and noise
pub use labeling::{DailyLabel, DailyLabelCreator, LabelTable, LabelThresholds};
pub use noise::{NoiseInjector, NoiseStatistics};

// Export
pub use export::{DatasetExporter, ExportedFiles};
