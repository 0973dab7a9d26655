//! Simulation orchestrator
//!
//! Drives the four activity generators over the full employee x day grid and
//! assembles the activity table. Travel runs first each day and its abroad
//! flag is threaded into the other three generators; the per-employee
//! `TripState` is owned here and discarded once the table is complete.
//!
//! The day loop for one employee is strictly chronological (the travel state
//! machine requires it); different employees are independent, so a
//! concurrent implementation could fan out per employee. Labeling must not
//! start until this phase has produced the complete table.

use crate::activity::{
    risk_travel_indicator, AccessActivityGenerator, BurnActivityGenerator, DailyActivityRecord,
    PrintActivityGenerator, TravelActivityGenerator, TripState,
};
use crate::employee::EmployeeProfile;
use crate::patterns::PatternTable;
use crate::simulation::{GenerationStatistics, SimulationError, SimulationResult};
use crate::types::{EmployeeId, RunId, SimulationConfig};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Coordinates the per-day activity generators over the whole population
#[derive(Debug)]
pub struct SimulationOrchestrator {
    config: SimulationConfig,
    employees: BTreeMap<EmployeeId, EmployeeProfile>,
    access_generator: AccessActivityGenerator,
    print_generator: PrintActivityGenerator,
    burn_generator: BurnActivityGenerator,
    travel_generator: TravelActivityGenerator,
    rng: StdRng,
    run_id: RunId,
    statistics: GenerationStatistics,
}

impl SimulationOrchestrator {
    /// Create an orchestrator for the given configuration and population
    #[instrument(skip(config, employees), fields(employee_count = employees.len(), days = config.days))]
    pub fn new(
        config: SimulationConfig,
        employees: BTreeMap<EmployeeId, EmployeeProfile>,
    ) -> SimulationResult<Self> {
        if employees.is_empty() {
            return Err(SimulationError::configuration(
                "cannot simulate an empty employee population",
            ));
        }

        let rng = match config.seed {
            Some(seed) => {
                info!("Using deterministic seed: {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => {
                debug!("Using entropy-based random seed");
                StdRng::from_entropy()
            }
        };

        let patterns = PatternTable::builtin();
        let malicious_employees = employees.values().filter(|e| e.is_malicious).count();
        let statistics =
            GenerationStatistics::new(employees.len(), malicious_employees, config.days);
        let run_id = RunId::new();

        info!(
            "Initialized orchestrator {} for {} employees ({} malicious) over {} days",
            run_id,
            employees.len(),
            malicious_employees,
            config.days
        );

        Ok(Self {
            access_generator: AccessActivityGenerator::new(patterns.clone()),
            print_generator: PrintActivityGenerator::new(patterns.clone()),
            burn_generator: BurnActivityGenerator::new(
                patterns.clone(),
                config.clearance_breach_probability,
            ),
            travel_generator: TravelActivityGenerator::new(patterns),
            config,
            employees,
            rng,
            run_id,
            statistics,
        })
    }

    /// Generate the complete activity table.
    ///
    /// Produces exactly one record per (employee, date) pair over the
    /// configured range, including all-zero records for inactive days.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> SimulationResult<Vec<DailyActivityRecord>> {
        let mut records =
            Vec::with_capacity(self.employees.len().saturating_mul(self.config.days));

        for profile in self.employees.values() {
            let mut trip_state = TripState::idle();
            for day_offset in 0..self.config.days {
                let date = self.config.start_date + Duration::days(day_offset as i64);

                // Travel first: its abroad flag gates the other generators
                let travel = self.travel_generator.generate(
                    profile,
                    date,
                    &mut trip_state,
                    &mut self.rng,
                )?;
                let is_abroad = travel.is_abroad;

                let access =
                    self.access_generator.generate(profile, date, is_abroad, &mut self.rng)?;
                let print = self.print_generator.generate(profile, is_abroad, &mut self.rng)?;
                let burn = self.burn_generator.generate(profile, is_abroad, &mut self.rng)?;

                let risk = risk_travel_indicator(profile, &travel, &print, &burn);

                let record =
                    DailyActivityRecord::new(profile, date, access, print, burn, travel, risk);
                self.statistics.record(&record);
                records.push(record);
            }
            debug!("Completed {} days for {}", self.config.days, profile.employee_id);
        }

        info!("Generation complete: {}", self.statistics.summary());
        Ok(records)
    }

    /// Statistics accumulated so far
    pub fn statistics(&self) -> &GenerationStatistics {
        &self.statistics
    }

    /// The identifier of this run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// The employee population the orchestrator runs over
    pub fn employees(&self) -> &BTreeMap<EmployeeId, EmployeeProfile> {
        &self.employees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::EmployeeGenerator;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            employee_count: 5,
            days: 20,
            malicious_ratio: 0.2,
            seed: Some(42),
            ..SimulationConfig::default()
        }
    }

    fn build_orchestrator(config: &SimulationConfig) -> SimulationOrchestrator {
        let employees = EmployeeGenerator::new(config.seed).generate(config).unwrap();
        SimulationOrchestrator::new(config.clone(), employees).unwrap()
    }

    #[test]
    fn test_empty_population_is_a_configuration_error() {
        let result = SimulationOrchestrator::new(small_config(), BTreeMap::new());
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn test_complete_grid() {
        let config = small_config();
        let mut orchestrator = build_orchestrator(&config);
        let records = orchestrator.run().unwrap();
        assert_eq!(records.len(), config.employee_count * config.days);

        // Every (employee, date) pair appears exactly once
        let mut seen = std::collections::HashSet::new();
        for record in &records {
            assert!(
                seen.insert((record.employee_id, record.date)),
                "duplicate row for {} on {}",
                record.employee_id,
                record.date
            );
            assert!(record.date >= config.start_date);
            assert!(record.date <= config.end_date());
        }
    }

    #[test]
    fn test_abroad_days_have_no_local_activity() {
        let config = SimulationConfig {
            employee_count: 8,
            days: 400,
            malicious_ratio: 0.5,
            seed: Some(7),
            ..SimulationConfig::default()
        };
        let mut orchestrator = build_orchestrator(&config);
        let records = orchestrator.run().unwrap();
        let mut abroad_seen = false;
        for record in &records {
            if record.travel.is_abroad {
                abroad_seen = true;
                assert_eq!(record.access.num_entries, 0);
                assert_eq!(record.print.num_print_commands, 0);
                assert_eq!(record.burn.num_burn_requests, 0);
            }
        }
        assert!(abroad_seen, "no abroad day in 3200 simulated days");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = small_config();
        let records_a = build_orchestrator(&config).run().unwrap();
        let records_b = build_orchestrator(&config).run().unwrap();
        assert_eq!(records_a, records_b);
    }

    #[test]
    fn test_statistics_match_table() {
        let config = small_config();
        let mut orchestrator = build_orchestrator(&config);
        let records = orchestrator.run().unwrap();
        let stats = orchestrator.statistics();
        assert_eq!(stats.total_records, records.len());
        assert_eq!(stats.expected_records(), records.len());
        assert_eq!(
            stats.abroad_days,
            records.iter().filter(|r| r.travel.is_abroad).count()
        );
    }
}
