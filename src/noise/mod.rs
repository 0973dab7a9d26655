//! Noise injection
//!
//! Optional post-labeling perturbation pass with per-field-group rates.

pub mod injector;

pub use injector::{NoiseInjector, NoiseStatistics};
