//! Employee profile generation
//!
//! Samples the static employee population the simulation runs over:
//! department and position, behavioral group, campus, clearance level,
//! seniority, origin country, and the malicious ground-truth subset.

use crate::employee::EmployeeProfile;
use crate::patterns::geography::{CAMPUSES, ORIGIN_COUNTRIES};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{BehavioralGroup, EmployeeId, SimulationConfig};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Seed stream offset so employee sampling and activity simulation draw from
/// independent sequences under the same run seed.
const EMPLOYEE_STREAM: u64 = 0x45_4d_50;

/// One department with its positions, behavioral group, and clearance
/// distribution.
struct DepartmentSpec {
    name: &'static str,
    group: BehavioralGroup,
    positions: &'static [&'static str],
    classification_levels: &'static [u8],
    classification_weights: &'static [f64],
}

const DEPARTMENTS: [DepartmentSpec; 8] = [
    DepartmentSpec {
        name: "Executive Management",
        group: BehavioralGroup::A,
        positions: &[
            "Chief Executive Officer (CEO)",
            "Chief Financial Officer (CFO)",
            "Chief Technology Officer (CTO)",
            "Chief Operating Officer (COO)",
            "Secretary",
        ],
        classification_levels: &[3, 4],
        classification_weights: &[0.3, 0.7],
    },
    DepartmentSpec {
        name: "R&D Department",
        group: BehavioralGroup::B,
        positions: &[
            "Head of R&D",
            "Systems Engineer",
            "Development Engineer",
            "Algorithm Engineer",
            "Integration and Testing Engineer",
            "Secretary",
        ],
        classification_levels: &[2, 3],
        classification_weights: &[0.6, 0.4],
    },
    DepartmentSpec {
        name: "Engineering Department",
        group: BehavioralGroup::B,
        positions: &[
            "Head of Engineering",
            "Process Engineer",
            "Design Engineer",
            "Test Engineer",
            "Secretary",
        ],
        classification_levels: &[2, 3],
        classification_weights: &[0.6, 0.4],
    },
    DepartmentSpec {
        name: "Operations and Manufacturing",
        group: BehavioralGroup::C,
        positions: &[
            "Operations Manager",
            "Manufacturing Engineer",
            "Logistics Manager",
            "Procurement Officer",
            "Warehouse Manager",
            "Secretary",
        ],
        classification_levels: &[1, 2, 3],
        classification_weights: &[0.5, 0.4, 0.1],
    },
    DepartmentSpec {
        name: "Human Resources",
        group: BehavioralGroup::C,
        positions: &["HR Manager", "Recruitment Coordinator", "Employee Welfare Coordinator"],
        classification_levels: &[1, 2, 3],
        classification_weights: &[0.5, 0.4, 0.1],
    },
    DepartmentSpec {
        name: "Marketing and Business Development",
        group: BehavioralGroup::D,
        positions: &[
            "Head of Marketing",
            "Business Development Manager",
            "Marketing Coordinator",
            "Secretary",
        ],
        classification_levels: &[1, 2, 3],
        classification_weights: &[0.5, 0.4, 0.1],
    },
    DepartmentSpec {
        name: "Security and Information Security",
        group: BehavioralGroup::E,
        positions: &[
            "Chief Information Security Officer (CISO)",
            "Information Security Investigator",
            "Cyber Analyst",
            "Physical Access Control",
            "Security Officer",
        ],
        classification_levels: &[2, 3, 4],
        classification_weights: &[0.2, 0.5, 0.3],
    },
    DepartmentSpec {
        name: "IT Department",
        group: BehavioralGroup::F,
        positions: &[
            "IT Manager",
            "System Administrator",
            "Network Administrator",
            "Helpdesk Technician",
        ],
        classification_levels: &[1, 2, 3],
        classification_weights: &[0.5, 0.4, 0.1],
    },
];

/// Seniority year ranges by position category (inclusive)
fn seniority_range(position: &str) -> (u32, u32) {
    if ["Chief", "Head of", "Director"].iter().any(|t| position.contains(t)) {
        (8, 30)
    } else if position.contains("Manager") {
        (5, 20)
    } else if position.contains("Secretary") {
        (1, 15)
    } else {
        (0, 25)
    }
}

/// Generates the static employee population for a run
#[derive(Debug)]
pub struct EmployeeGenerator {
    rng: StdRng,
}

impl EmployeeGenerator {
    /// Create a generator, deriving its RNG stream from the run seed
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ EMPLOYEE_STREAM),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Generate the employee population described by the configuration.
    ///
    /// The malicious subset is `floor(employee_count * malicious_ratio)`
    /// employees sampled without replacement; under a fixed seed the same
    /// employees are selected on every run.
    pub fn generate(
        &mut self,
        config: &SimulationConfig,
    ) -> SimulationResult<BTreeMap<EmployeeId, EmployeeProfile>> {
        info!(
            "Generating {} employee profiles ({}% malicious)",
            config.employee_count,
            config.malicious_ratio * 100.0
        );

        let origin_weights = WeightedIndex::new(ORIGIN_COUNTRIES.iter().map(|(_, w)| *w))
            .map_err(|e| {
                SimulationError::configuration(format!("invalid origin-country weights: {}", e))
            })?;

        let malicious_count =
            (config.employee_count as f64 * config.malicious_ratio).floor() as usize;
        let malicious_indices: std::collections::HashSet<usize> =
            rand::seq::index::sample(&mut self.rng, config.employee_count, malicious_count)
                .into_iter()
                .collect();

        let mut employees = BTreeMap::new();
        for i in 0..config.employee_count {
            let employee_id = EmployeeId::from_index(i as u32 + 1);
            let department = &DEPARTMENTS[self.rng.gen_range(0..DEPARTMENTS.len())];
            let position = department.positions[self.rng.gen_range(0..department.positions.len())];

            let classification_weights =
                WeightedIndex::new(department.classification_weights.iter().copied()).map_err(
                    |e| {
                        SimulationError::configuration(format!(
                            "invalid classification weights for {}: {}",
                            department.name, e
                        ))
                    },
                )?;
            let classification_level =
                department.classification_levels[classification_weights.sample(&mut self.rng)];

            let (min_years, max_years) = seniority_range(position);
            let seniority_years = self.rng.gen_range(min_years..=max_years);

            let origin_country = ORIGIN_COUNTRIES[origin_weights.sample(&mut self.rng)].0;
            let campus = CAMPUSES[self.rng.gen_range(0..CAMPUSES.len())];

            let profile = EmployeeProfile {
                employee_id,
                department: department.name.to_string(),
                campus: campus.to_string(),
                position: position.to_string(),
                seniority_years,
                classification_level,
                behavioral_group: department.group,
                origin_country: origin_country.to_string(),
                is_malicious: malicious_indices.contains(&i),
            };
            debug!(
                "Generated {}: {} / {} (group {}, clearance {})",
                employee_id,
                profile.department,
                profile.position,
                profile.behavioral_group,
                profile.classification_level
            );
            employees.insert(employee_id, profile);
        }

        info!(
            "Generated {} employees, {} marked malicious",
            employees.len(),
            employees.values().filter(|e| e.is_malicious).count()
        );
        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(count: usize, ratio: f64) -> SimulationConfig {
        SimulationConfig {
            employee_count: count,
            malicious_ratio: ratio,
            seed: Some(42),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_generates_requested_count() {
        let mut generator = EmployeeGenerator::new(Some(42));
        let employees = generator.generate(&test_config(50, 0.1)).unwrap();
        assert_eq!(employees.len(), 50);
    }

    #[test]
    fn test_malicious_count_uses_floor() {
        let mut generator = EmployeeGenerator::new(Some(42));
        let employees = generator.generate(&test_config(50, 0.1)).unwrap();
        let malicious = employees.values().filter(|e| e.is_malicious).count();
        assert_eq!(malicious, 5);

        // 10 * 0.19 floors to 1
        let mut generator = EmployeeGenerator::new(Some(42));
        let employees = generator.generate(&test_config(10, 0.19)).unwrap();
        assert_eq!(employees.values().filter(|e| e.is_malicious).count(), 1);
    }

    #[test]
    fn test_same_seed_reproduces_population() {
        let config = test_config(30, 0.1);
        let a = EmployeeGenerator::new(Some(7)).generate(&config).unwrap();
        let b = EmployeeGenerator::new(Some(7)).generate(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ids_are_sequential_and_sorted() {
        let mut generator = EmployeeGenerator::new(Some(42));
        let employees = generator.generate(&test_config(10, 0.0)).unwrap();
        let ids: Vec<u32> = employees.keys().map(|id| id.index()).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_classification_levels_in_range() {
        let mut generator = EmployeeGenerator::new(Some(42));
        let employees = generator.generate(&test_config(200, 0.05)).unwrap();
        for profile in employees.values() {
            assert!((1..=4).contains(&profile.classification_level));
            assert!(profile.seniority_years <= 30);
            assert!(!profile.department.is_empty());
            assert!(!profile.position.is_empty());
        }
    }

    #[test]
    fn test_group_matches_department() {
        let mut generator = EmployeeGenerator::new(Some(42));
        let employees = generator.generate(&test_config(200, 0.05)).unwrap();
        for profile in employees.values() {
            match profile.department.as_str() {
                "Executive Management" => {
                    assert_eq!(profile.behavioral_group, BehavioralGroup::A)
                }
                "Security and Information Security" => {
                    assert_eq!(profile.behavioral_group, BehavioralGroup::E)
                }
                "IT Department" => assert_eq!(profile.behavioral_group, BehavioralGroup::F),
                _ => {}
            }
        }
    }
}
