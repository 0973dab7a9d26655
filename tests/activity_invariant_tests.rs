//! Integration tests for activity-table invariants
//!
//! Runs the full generation pipeline over seeded populations and checks the
//! numeric and structural invariants every row must satisfy.

use insider_threat_simulator::employee::EmployeeGenerator;
use insider_threat_simulator::simulation::SimulationOrchestrator;
use insider_threat_simulator::types::SimulationConfig;
use insider_threat_simulator::DailyActivityRecord;
use std::collections::HashSet;

fn generate_table(config: &SimulationConfig) -> Vec<DailyActivityRecord> {
    let employees = EmployeeGenerator::new(config.seed).generate(config).unwrap();
    let mut orchestrator = SimulationOrchestrator::new(config.clone(), employees).unwrap();
    orchestrator.run().unwrap()
}

fn standard_config() -> SimulationConfig {
    SimulationConfig {
        employee_count: 25,
        days: 120,
        malicious_ratio: 0.2,
        seed: Some(1234),
        ..SimulationConfig::default()
    }
}

#[test]
fn every_employee_date_pair_has_exactly_one_record() {
    let config = standard_config();
    let records = generate_table(&config);
    assert_eq!(records.len(), config.employee_count * config.days);

    let mut seen = HashSet::new();
    for record in &records {
        assert!(
            seen.insert((record.employee_id, record.date)),
            "duplicate record for {} on {}",
            record.employee_id,
            record.date
        );
    }

    // Every date in range appears for every employee, including
    // inactive all-zero days
    let employees: HashSet<_> = records.iter().map(|r| r.employee_id).collect();
    assert_eq!(employees.len(), config.employee_count);
    for employee in employees {
        let days = records.iter().filter(|r| r.employee_id == employee).count();
        assert_eq!(days, config.days);
    }
}

#[test]
fn ratios_stay_in_unit_interval_and_counts_consistent() {
    let records = generate_table(&standard_config());
    for record in &records {
        assert!(
            (0.0..=1.0).contains(&record.print.ratio_color_prints),
            "color ratio out of range: {}",
            record.print.ratio_color_prints
        );
        assert_eq!(
            record.print.num_color_prints + record.print.num_bw_prints,
            record.print.total_printed_pages,
            "color split does not sum for {} on {}",
            record.employee_id,
            record.date
        );
        assert!(record.print.num_print_commands_off_hours <= record.print.num_print_commands);
        assert!(record.print.num_printed_pages_off_hours <= record.print.total_printed_pages);
        assert!(record.burn.num_burn_requests_off_hours <= record.burn.num_burn_requests);
        assert_eq!(record.access.num_entries, record.access.num_exits);
    }
}

#[test]
fn non_malicious_burns_never_exceed_clearance() {
    let records = generate_table(&standard_config());
    for record in records.iter().filter(|r| !r.is_malicious) {
        assert!(
            record.burn.max_request_classification <= record.employee_classification_level,
            "{} (clearance {}) burned at level {}",
            record.employee_id,
            record.employee_classification_level,
            record.burn.max_request_classification
        );
    }
}

#[test]
fn burn_classification_stays_within_system_bounds() {
    let records = generate_table(&standard_config());
    for record in &records {
        assert!(record.burn.max_request_classification <= 4);
        if record.burn.num_burn_requests > 0 {
            assert!(record.burn.max_request_classification >= 1);
            assert!(record.burn.avg_request_classification >= 1.0);
            assert!(
                record.burn.avg_request_classification
                    <= f64::from(record.burn.max_request_classification)
            );
        } else {
            assert_eq!(record.burn.max_request_classification, 0);
            assert_eq!(record.burn.avg_request_classification, 0.0);
        }
    }
}

#[test]
fn abroad_days_suppress_local_activity() {
    let config = SimulationConfig {
        employee_count: 10,
        days: 365,
        malicious_ratio: 0.5,
        seed: Some(99),
        ..SimulationConfig::default()
    };
    let records = generate_table(&config);
    let abroad: Vec<_> = records.iter().filter(|r| r.travel.is_abroad).collect();
    assert!(!abroad.is_empty(), "expected abroad days in a year of travel-heavy simulation");
    for record in abroad {
        assert_eq!(record.access.num_entries, 0);
        assert_eq!(record.access.total_presence_minutes, 0);
        assert!(record.access.first_entry_time.is_none());
        assert_eq!(record.print.num_print_commands, 0);
        assert_eq!(record.burn.num_burn_requests, 0);
    }
}

#[test]
fn official_benign_trips_never_raise_the_risk_indicator() {
    let config = SimulationConfig {
        employee_count: 20,
        days: 365,
        malicious_ratio: 0.3,
        seed: Some(2024),
        ..SimulationConfig::default()
    };
    let records = generate_table(&config);
    for record in &records {
        if record.travel.is_abroad
            && record.travel.is_official_trip
            && record.travel.hostility_country_level == 0
        {
            assert!(
                !record.risk_travel_indicator,
                "{} flagged on an official hostility-0 trip on {}",
                record.employee_id,
                record.date
            );
        }
    }
}

#[test]
fn risk_indicator_implies_being_abroad() {
    let config = SimulationConfig {
        employee_count: 20,
        days: 365,
        malicious_ratio: 0.5,
        seed: Some(31),
        ..SimulationConfig::default()
    };
    let records = generate_table(&config);
    for record in &records {
        if record.risk_travel_indicator {
            assert!(record.travel.is_abroad);
            assert!(
                record.travel.hostility_country_level >= 1,
                "risk indicator on a non-hostile trip"
            );
        }
    }
}

#[test]
fn presence_minutes_match_entry_and_exit_times() {
    let records = generate_table(&standard_config());
    for record in &records {
        match (record.access.first_entry_time, record.access.last_exit_time) {
            (Some(first), Some(last)) => {
                assert!(last > first);
                assert_eq!(
                    record.access.total_presence_minutes,
                    (last - first).num_minutes() as u32
                );
            }
            (None, None) => assert_eq!(record.access.total_presence_minutes, 0),
            _ => panic!("entry/exit times must be both present or both absent"),
        }
    }
}

#[test]
fn fresh_rows_are_unmodified() {
    let records = generate_table(&standard_config());
    for record in &records {
        assert!(!record.row_modified);
        assert!(record.modification_details.is_empty());
    }
}
