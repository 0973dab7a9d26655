//! Behavioral pattern table
//!
//! Per-group activity-distribution parameters for the six behavioral groups,
//! plus the malicious-delta overrides applied on top of any group when an
//! employee carries the malicious ground truth. Keeping the conditioning in
//! one tagged configuration record keeps the generators free of scattered
//! special cases and makes the parameters testable on their own.

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::BehavioralGroup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Work-hour distribution parameters (decimal hours)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHoursPattern {
    /// Mean first-entry hour
    pub start_mean: f64,
    /// Standard deviation of the first-entry hour
    pub start_std: f64,
    /// Mean last-exit hour
    pub end_mean: f64,
    /// Standard deviation of the last-exit hour
    pub end_std: f64,
}

/// Printing behavior parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintPattern {
    /// Probability of any printing on a given day
    pub likelihood: f64,
    /// Mean number of print commands (Poisson)
    pub commands_mean: f64,
    /// Mean number of printed pages (gamma-tailed)
    pub pages_mean: f64,
    /// Typical fraction of color pages
    pub color_ratio: f64,
}

/// Document-destruction behavior parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnPattern {
    /// Probability of any burn activity on a given day
    pub likelihood: f64,
    /// Mean number of burn requests (Poisson)
    pub requests_mean: f64,
    /// Log-space mean of the burned volume in MB (lognormal)
    pub volume_mean_log: f64,
    /// Mean number of burned files (Poisson)
    pub files_mean: f64,
    /// Group routinely handles documents at its clearance ceiling
    pub high_classification: bool,
}

/// Full per-group behavior pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPattern {
    /// Work-hour distribution
    pub work_hours: WorkHoursPattern,
    /// Printing parameters
    pub print: PrintPattern,
    /// Burn parameters
    pub burn: BurnPattern,
    /// Probability of starting a trip on an idle day
    pub travel_likelihood: f64,
    /// Probability of activity falling in the off-hours window
    pub off_hours_tendency: f64,
    /// Weekend-work probability, for groups with weekend shifts
    pub weekend_work: Option<f64>,
}

/// Deltas applied on top of the group pattern for malicious employees.
///
/// One record for the whole population: the malicious variant of any group is
/// its base pattern plus these overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaliciousOverrides {
    /// Multiplier on the work-hour standard deviations (wider spread)
    pub work_hours_std_multiplier: f64,
    /// Probability of an extreme early/late work-hour override
    pub extreme_hours_probability: f64,
    /// Weekend-work probability for malicious employees outside shift groups
    pub weekend_work_probability: f64,
    /// Multiplier on printed-page volume base (bulk printing tail)
    pub print_pages_multiplier: f64,
    /// Multiplier on the burn likelihood
    pub burn_likelihood_multiplier: f64,
    /// Widened lognormal sigma for burn volume
    pub burn_volume_sigma: f64,
    /// Multiplier on the travel likelihood
    pub travel_multiplier: f64,
    /// Multiplier on the off-hours tendency (capped downstream)
    pub off_hours_multiplier: f64,
    /// Base probability that a new trip is official (lower than regular)
    pub official_trip_probability: f64,
}

/// Corresponding baseline probabilities for non-malicious employees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularBaselines {
    /// Probability of an extreme early/late work-hour override
    pub extreme_hours_probability: f64,
    /// Weekend-work probability outside shift groups
    pub weekend_work_probability: f64,
    /// Lognormal sigma for burn volume
    pub burn_volume_sigma: f64,
    /// Base probability that a new trip is official
    pub official_trip_probability: f64,
}

/// The complete behavioral pattern configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternTable {
    groups: HashMap<BehavioralGroup, GroupPattern>,
    /// Malicious-delta overrides shared by all groups
    pub malicious: MaliciousOverrides,
    /// Baselines for non-malicious employees
    pub regular: RegularBaselines,
}

impl PatternTable {
    /// The built-in pattern table used by default
    pub fn builtin() -> Self {
        let mut groups = HashMap::new();

        // Executive management
        groups.insert(
            BehavioralGroup::A,
            GroupPattern {
                work_hours: WorkHoursPattern {
                    start_mean: 7.5,
                    start_std: 1.0,
                    end_mean: 18.5,
                    end_std: 1.5,
                },
                print: PrintPattern {
                    likelihood: 0.4,
                    commands_mean: 4.0,
                    pages_mean: 12.0,
                    color_ratio: 0.4,
                },
                burn: BurnPattern {
                    likelihood: 0.08,
                    requests_mean: 2.0,
                    volume_mean_log: 7.5,
                    files_mean: 15.0,
                    high_classification: true,
                },
                travel_likelihood: 0.015,
                off_hours_tendency: 0.3,
                weekend_work: None,
            },
        );

        // Developers and engineers
        groups.insert(
            BehavioralGroup::B,
            GroupPattern {
                work_hours: WorkHoursPattern {
                    start_mean: 8.5,
                    start_std: 0.8,
                    end_mean: 18.0,
                    end_std: 2.0,
                },
                print: PrintPattern {
                    likelihood: 0.2,
                    commands_mean: 2.0,
                    pages_mean: 6.0,
                    color_ratio: 0.1,
                },
                burn: BurnPattern {
                    likelihood: 0.12,
                    requests_mean: 3.0,
                    volume_mean_log: 6.8,
                    files_mean: 35.0,
                    high_classification: false,
                },
                travel_likelihood: 0.003,
                off_hours_tendency: 0.4,
                weekend_work: None,
            },
        );

        // Office workers and secretaries
        groups.insert(
            BehavioralGroup::C,
            GroupPattern {
                work_hours: WorkHoursPattern {
                    start_mean: 8.0,
                    start_std: 0.3,
                    end_mean: 16.5,
                    end_std: 0.5,
                },
                print: PrintPattern {
                    likelihood: 0.6,
                    commands_mean: 5.0,
                    pages_mean: 18.0,
                    color_ratio: 0.25,
                },
                burn: BurnPattern {
                    likelihood: 0.03,
                    requests_mean: 1.0,
                    volume_mean_log: 5.5,
                    files_mean: 8.0,
                    high_classification: false,
                },
                travel_likelihood: 0.001,
                off_hours_tendency: 0.05,
                weekend_work: None,
            },
        );

        // Marketing and business development
        groups.insert(
            BehavioralGroup::D,
            GroupPattern {
                work_hours: WorkHoursPattern {
                    start_mean: 8.2,
                    start_std: 1.0,
                    end_mean: 17.8,
                    end_std: 1.8,
                },
                print: PrintPattern {
                    likelihood: 0.7,
                    commands_mean: 6.0,
                    pages_mean: 22.0,
                    color_ratio: 0.6,
                },
                burn: BurnPattern {
                    likelihood: 0.06,
                    requests_mean: 2.0,
                    volume_mean_log: 6.5,
                    files_mean: 20.0,
                    high_classification: false,
                },
                travel_likelihood: 0.012,
                off_hours_tendency: 0.2,
                weekend_work: None,
            },
        );

        // Security personnel: shift coverage means wide work-hour spread and
        // routine weekend presence
        groups.insert(
            BehavioralGroup::E,
            GroupPattern {
                work_hours: WorkHoursPattern {
                    start_mean: 8.0,
                    start_std: 4.0,
                    end_mean: 17.0,
                    end_std: 4.0,
                },
                print: PrintPattern {
                    likelihood: 0.15,
                    commands_mean: 2.0,
                    pages_mean: 4.0,
                    color_ratio: 0.05,
                },
                burn: BurnPattern {
                    likelihood: 0.04,
                    requests_mean: 1.0,
                    volume_mean_log: 6.0,
                    files_mean: 5.0,
                    high_classification: true,
                },
                travel_likelihood: 0.001,
                off_hours_tendency: 0.3,
                weekend_work: Some(0.6),
            },
        );

        // IT staff
        groups.insert(
            BehavioralGroup::F,
            GroupPattern {
                work_hours: WorkHoursPattern {
                    start_mean: 8.5,
                    start_std: 1.2,
                    end_mean: 17.5,
                    end_std: 2.5,
                },
                print: PrintPattern {
                    likelihood: 0.25,
                    commands_mean: 3.0,
                    pages_mean: 9.0,
                    color_ratio: 0.15,
                },
                burn: BurnPattern {
                    likelihood: 0.15,
                    requests_mean: 4.0,
                    volume_mean_log: 7.2,
                    files_mean: 45.0,
                    high_classification: false,
                },
                travel_likelihood: 0.002,
                off_hours_tendency: 0.35,
                weekend_work: None,
            },
        );

        Self {
            groups,
            malicious: MaliciousOverrides {
                work_hours_std_multiplier: 1.5,
                extreme_hours_probability: 0.01,
                weekend_work_probability: 0.3,
                print_pages_multiplier: 5.0,
                burn_likelihood_multiplier: 3.0,
                burn_volume_sigma: 1.5,
                travel_multiplier: 1.5,
                off_hours_multiplier: 1.8,
                official_trip_probability: 0.55,
            },
            regular: RegularBaselines {
                extreme_hours_probability: 0.008,
                weekend_work_probability: 0.05,
                burn_volume_sigma: 1.0,
                official_trip_probability: 0.7,
            },
        }
    }

    /// Look up the pattern for a behavioral group.
    ///
    /// A missing group is a configuration error: the table is expected to
    /// cover every group an employee can carry.
    pub fn get(&self, group: BehavioralGroup) -> SimulationResult<&GroupPattern> {
        self.groups.get(&group).ok_or_else(|| {
            SimulationError::configuration(format!(
                "no behavioral pattern configured for group {}",
                group
            ))
        })
    }

    /// Number of configured groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::builtin()
    }
}
