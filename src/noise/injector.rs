//! Consistency-preserving noise injection
//!
//! Optional post-labeling pass that perturbs a configured fraction of rows
//! per field group (burn, print, entry time) with bounded uniform or Gaussian
//! deltas, then recomputes every field that functionally depends on a
//! perturbed one. Modified rows carry `row_modified` and a human-readable
//! change log; untouched rows are left byte-identical. The pass never alters
//! `employee_id`, `date`, or any label field, and rows are independent of
//! each other.

use crate::activity::DailyActivityRecord;
use crate::activity::sampling;
use crate::types::{off_hours, NoiseRates};
use chrono::{NaiveTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Seed stream offset so noise is decoupled from generation and labeling
const NOISE_STREAM: u64 = 0x4e_4f_49;

/// Highest classification level in the system
const MAX_CLASSIFICATION_LEVEL: u8 = 4;

/// Counters describing one noise pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseStatistics {
    /// Rows examined
    pub total_rows: usize,
    /// Rows with at least one modification
    pub modified_rows: usize,
    /// Rows with burn-field modifications
    pub burn_modifications: usize,
    /// Rows with print-field modifications
    pub print_modifications: usize,
    /// Rows with entry-time modifications
    pub entry_time_modifications: usize,
}

/// Injects bounded noise into the activity table
#[derive(Debug)]
pub struct NoiseInjector {
    rates: NoiseRates,
    rng: StdRng,
    statistics: NoiseStatistics,
}

impl NoiseInjector {
    /// Create an injector with the given rates, deriving its RNG stream from
    /// the run seed
    pub fn new(rates: NoiseRates, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ NOISE_STREAM),
            None => StdRng::from_entropy(),
        };
        Self { rates, rng, statistics: NoiseStatistics::default() }
    }

    /// Apply noise to the whole table, row by row
    pub fn apply(&mut self, records: &mut [DailyActivityRecord]) -> NoiseStatistics {
        info!("Starting noise injection over {} rows", records.len());
        self.statistics = NoiseStatistics { total_rows: records.len(), ..Default::default() };

        for record in records.iter_mut() {
            let mut changes = Vec::new();
            self.inject_burn_noise(record, &mut changes);
            self.inject_print_noise(record, &mut changes);
            self.inject_entry_time_noise(record, &mut changes);

            if changes.is_empty() {
                record.row_modified = false;
                record.modification_details = String::new();
            } else {
                record.row_modified = true;
                record.modification_details = changes.join("; ");
                self.statistics.modified_rows += 1;
            }
        }

        info!(
            "Noise injection completed: modified {} of {} rows",
            self.statistics.modified_rows, self.statistics.total_rows
        );
        self.statistics.clone()
    }

    /// Perturb burn fields on rows that already carry burn activity.
    ///
    /// Zero rows are left untouched so the request/classification invariants
    /// keep holding.
    fn inject_burn_noise(&mut self, record: &mut DailyActivityRecord, changes: &mut Vec<String>) {
        if record.burn.num_burn_requests == 0 || self.rng.gen::<f64>() >= self.rates.burn_rate {
            return;
        }
        self.statistics.burn_modifications += 1;

        let delta_requests = if self.rates.use_gaussian {
            (sampling::normal(&mut self.rng, 2.0, 1.0).round() as i64).max(1) as u32
        } else {
            self.rng.gen_range(1..=3)
        };
        record.burn.num_burn_requests += delta_requests;
        changes.push(format!("num_burn_requests += {}", delta_requests));

        let delta_files = if self.rates.use_gaussian {
            (sampling::normal(&mut self.rng, 6.0, 4.0).round() as i64).max(1) as u32
        } else {
            self.rng.gen_range(2..=10)
        };
        record.burn.total_files_burned += delta_files;
        changes.push(format!("total_files_burned += {}", delta_files));

        let delta_mb = if self.rates.use_gaussian {
            (sampling::normal(&mut self.rng, 175.0, 75.0).round() as i64).max(50) as u32
        } else {
            self.rng.gen_range(50..=300)
        };
        record.burn.total_burn_volume_mb += delta_mb;
        changes.push(format!("total_burn_volume_mb += {}", delta_mb));

        if self.rng.gen::<f64>() < 0.3 {
            let bumped =
                (record.burn.num_burn_requests_off_hours + 1).min(record.burn.num_burn_requests);
            if bumped != record.burn.num_burn_requests_off_hours {
                record.burn.num_burn_requests_off_hours = bumped;
                changes.push("num_burn_requests_off_hours += 1".to_string());
            }
        }

        // Max classification may creep up, but never past the system ceiling
        // and never past the clearance of a non-malicious employee
        let classification_cap = if record.is_malicious {
            MAX_CLASSIFICATION_LEVEL
        } else {
            record.employee_classification_level.min(MAX_CLASSIFICATION_LEVEL)
        };
        if self.rng.gen::<f64>() < 0.05
            && record.burn.max_request_classification < classification_cap
        {
            record.burn.max_request_classification += 1;
            changes.push("max_request_classification += 1".to_string());
        }

        let delta_avg = if self.rates.use_gaussian {
            sampling::normal(&mut self.rng, 0.0, 0.3)
        } else {
            self.rng.gen_range(-0.4..0.4)
        };
        let ceiling = f64::from(record.burn.max_request_classification.max(1));
        record.burn.avg_request_classification =
            (record.burn.avg_request_classification + delta_avg).clamp(1.0, ceiling);
        changes.push(format!("avg_request_classification adjusted by {:.2}", delta_avg));

        if self.rng.gen::<f64>() < 0.03 {
            if record.burn.burn_campuses < 2 {
                record.burn.burn_campuses += 1;
                changes.push(format!("burn_campuses -> {}", record.burn.burn_campuses));
            }
            if record.burn.burn_campuses > 1 && !record.burn.burned_from_other_campus {
                record.burn.burned_from_other_campus = true;
                changes.push("burned_from_other_campus set".to_string());
            }
        }
    }

    /// Perturb print fields, keeping the commands/pages ratio and the
    /// color/monochrome split consistent.
    fn inject_print_noise(&mut self, record: &mut DailyActivityRecord, changes: &mut Vec<String>) {
        if record.print.num_print_commands == 0 || self.rng.gen::<f64>() >= self.rates.print_rate {
            return;
        }
        self.statistics.print_modifications += 1;

        let factor = if self.rates.use_gaussian {
            sampling::normal(&mut self.rng, 0.15, 0.05).max(0.05)
        } else {
            self.rng.gen_range(0.05..0.2)
        };
        let old_commands = record.print.num_print_commands;
        let delta_commands = ((f64::from(old_commands) * factor) as u32).max(1);
        record.print.num_print_commands += delta_commands;
        changes.push(format!("num_print_commands += {}", delta_commands));

        // Grow pages at the row's own pages-per-command rate
        let pages_per_command =
            f64::from(record.print.total_printed_pages) / f64::from(old_commands.max(1));
        let additional_pages = (f64::from(delta_commands) * pages_per_command) as u32;
        record.print.total_printed_pages += additional_pages;
        changes.push(format!("total_printed_pages += {}", additional_pages));

        let color_delta = if self.rates.use_gaussian {
            sampling::normal(&mut self.rng, 0.0, 0.03)
        } else {
            self.rng.gen_range(-0.05..0.05)
        };
        let target_ratio =
            sampling::clamp_ratio(record.print.ratio_color_prints + color_delta);

        // Re-derive the split so color + bw still equals the new total
        let total = record.print.total_printed_pages;
        record.print.num_color_prints =
            ((f64::from(total) * target_ratio).round() as u32).min(total);
        record.print.num_bw_prints = total - record.print.num_color_prints;
        record.print.ratio_color_prints = if total > 0 {
            f64::from(record.print.num_color_prints) / f64::from(total)
        } else {
            0.0
        };
        changes.push(format!("ratio_color_prints adjusted by {:.3}", color_delta));

        if self.rng.gen::<f64>() < 0.3 {
            let bumped = (record.print.num_print_commands_off_hours + 1)
                .min(record.print.num_print_commands);
            if bumped != record.print.num_print_commands_off_hours {
                record.print.num_print_commands_off_hours = bumped;
                changes.push("num_print_commands_off_hours += 1".to_string());
            }
        }
    }

    /// Shift the first entry time and recompute its dependent fields
    fn inject_entry_time_noise(
        &mut self,
        record: &mut DailyActivityRecord,
        changes: &mut Vec<String>,
    ) {
        let Some(first_entry) = record.access.first_entry_time else {
            return;
        };
        if self.rng.gen::<f64>() >= self.rates.entry_time_rate {
            return;
        }
        self.statistics.entry_time_modifications += 1;

        let delta_minutes = if self.rates.use_gaussian {
            sampling::normal(&mut self.rng, 0.0, 7.0).round() as i64
        } else {
            self.rng.gen_range(-10..=10)
        };

        let minutes_of_day = i64::from(first_entry.hour()) * 60 + i64::from(first_entry.minute());
        let shifted = (minutes_of_day + delta_minutes).clamp(0, 23 * 60 + 59);
        let new_time =
            NaiveTime::from_hms_opt((shifted / 60) as u32, (shifted % 60) as u32, 0)
                .unwrap_or(first_entry);
        record.access.first_entry_time = Some(new_time);
        changes.push(format!("first_entry_time shifted by {} min", delta_minutes));

        // Dependent flags and presence minutes follow the new entry time
        record.access.entered_during_night_hours = off_hours::is_night_hour(new_time.hour());
        record.access.early_entry_flag = new_time.hour() < off_hours::EARLY_ENTRY_HOUR;
        if let Some(last_exit) = record.access.last_exit_time {
            record.access.total_presence_minutes =
                (last_exit - new_time).num_minutes().max(0) as u32;
        }
        changes.push("recomputed entry flags and presence".to_string());

        debug!(
            "Shifted entry time for {} on {} by {} minutes",
            record.employee_id, record.date, delta_minutes
        );
    }

    /// Statistics of the last pass
    pub fn statistics(&self) -> &NoiseStatistics {
        &self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{
        AccessActivity, BurnActivity, PrintActivity, TravelActivity,
    };
    use crate::employee::EmployeeProfile;
    use crate::types::{BehavioralGroup, EmployeeId};
    use chrono::NaiveDate;

    fn active_record(index: u32, malicious: bool) -> DailyActivityRecord {
        let profile = EmployeeProfile {
            employee_id: EmployeeId::from_index(index),
            department: "IT Department".to_string(),
            campus: "Campus A".to_string(),
            position: "System Administrator".to_string(),
            seniority_years: 5,
            classification_level: 2,
            behavioral_group: BehavioralGroup::F,
            origin_country: "Israel".to_string(),
            is_malicious: malicious,
        };
        let access = AccessActivity {
            num_entries: 1,
            num_exits: 1,
            first_entry_time: NaiveTime::from_hms_opt(8, 30, 0),
            last_exit_time: NaiveTime::from_hms_opt(17, 45, 0),
            total_presence_minutes: 555,
            entered_during_night_hours: false,
            early_entry_flag: false,
            late_exit_flag: false,
            entry_during_weekend: false,
            num_unique_campus: 1,
            accessed_other_campus: false,
        };
        let print = PrintActivity {
            num_print_commands: 4,
            total_printed_pages: 20,
            num_print_commands_off_hours: 1,
            num_printed_pages_off_hours: 5,
            num_color_prints: 5,
            num_bw_prints: 15,
            ratio_color_prints: 0.25,
            printed_from_other_campus: false,
            print_campuses: 1,
        };
        let burn = BurnActivity {
            num_burn_requests: 2,
            max_request_classification: 2,
            avg_request_classification: 1.5,
            num_burn_requests_off_hours: 0,
            total_burn_volume_mb: 400,
            total_files_burned: 10,
            burned_from_other_campus: false,
            burn_campuses: 1,
        };
        DailyActivityRecord::new(
            &profile,
            NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            access,
            print,
            burn,
            TravelActivity::empty(),
            false,
        )
    }

    fn full_rates() -> NoiseRates {
        NoiseRates { burn_rate: 1.0, print_rate: 1.0, entry_time_rate: 1.0, use_gaussian: false }
    }

    #[test]
    fn test_zero_rates_leave_rows_identical() {
        let rates =
            NoiseRates { burn_rate: 0.0, print_rate: 0.0, entry_time_rate: 0.0, use_gaussian: false };
        let mut records: Vec<DailyActivityRecord> =
            (1..=20).map(|i| active_record(i, false)).collect();
        let originals = records.clone();

        let stats = NoiseInjector::new(rates, Some(42)).apply(&mut records);
        assert_eq!(stats.modified_rows, 0);
        assert_eq!(records, originals);
    }

    #[test]
    fn test_untouched_rows_are_identical_under_partial_rates() {
        let rates =
            NoiseRates { burn_rate: 0.3, print_rate: 0.3, entry_time_rate: 0.3, use_gaussian: false };
        let mut records: Vec<DailyActivityRecord> =
            (1..=200).map(|i| active_record(i, false)).collect();
        let originals = records.clone();

        NoiseInjector::new(rates, Some(42)).apply(&mut records);
        for (noised, original) in records.iter().zip(&originals) {
            if !noised.row_modified {
                assert_eq!(noised, original);
            } else {
                assert!(!noised.modification_details.is_empty());
            }
        }
    }

    #[test]
    fn test_modified_rows_keep_field_consistency() {
        for use_gaussian in [false, true] {
            let rates = NoiseRates { use_gaussian, ..full_rates() };
            let mut records: Vec<DailyActivityRecord> =
                (1..=300).map(|i| active_record(i, i % 2 == 0)).collect();
            NoiseInjector::new(rates, Some(7)).apply(&mut records);

            for record in &records {
                assert!(record.row_modified);
                assert_eq!(
                    record.print.num_color_prints + record.print.num_bw_prints,
                    record.print.total_printed_pages
                );
                assert!((0.0..=1.0).contains(&record.print.ratio_color_prints));
                assert!(
                    record.print.num_print_commands_off_hours <= record.print.num_print_commands
                );
                assert!(
                    record.burn.num_burn_requests_off_hours <= record.burn.num_burn_requests
                );
                assert!(record.burn.avg_request_classification >= 1.0);
                assert!(
                    record.burn.avg_request_classification
                        <= f64::from(record.burn.max_request_classification)
                );
                let first = record.access.first_entry_time.unwrap();
                let last = record.access.last_exit_time.unwrap();
                assert_eq!(
                    record.access.total_presence_minutes,
                    (last - first).num_minutes().max(0) as u32
                );
            }
        }
    }

    #[test]
    fn test_non_malicious_clearance_cap_survives_noise() {
        let mut records: Vec<DailyActivityRecord> =
            (1..=500).map(|i| active_record(i, false)).collect();
        NoiseInjector::new(full_rates(), Some(11)).apply(&mut records);
        for record in &records {
            assert!(
                record.burn.max_request_classification <= record.employee_classification_level
            );
        }
    }

    #[test]
    fn test_identity_fields_are_never_touched() {
        let mut records: Vec<DailyActivityRecord> =
            (1..=100).map(|i| active_record(i, false)).collect();
        let originals = records.clone();
        NoiseInjector::new(full_rates(), Some(5)).apply(&mut records);
        for (noised, original) in records.iter().zip(&originals) {
            assert_eq!(noised.employee_id, original.employee_id);
            assert_eq!(noised.date, original.date);
            assert_eq!(noised.is_malicious, original.is_malicious);
        }
    }

    #[test]
    fn test_zero_activity_rows_stay_zero() {
        let profile = EmployeeProfile {
            employee_id: EmployeeId::from_index(1),
            department: "Human Resources".to_string(),
            campus: "Campus A".to_string(),
            position: "HR Manager".to_string(),
            seniority_years: 8,
            classification_level: 1,
            behavioral_group: BehavioralGroup::C,
            origin_country: "Israel".to_string(),
            is_malicious: false,
        };
        let mut records = vec![DailyActivityRecord::new(
            &profile,
            NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            AccessActivity::empty(),
            PrintActivity::empty(),
            BurnActivity::empty(),
            TravelActivity::empty(),
            false,
        )];
        let original = records[0].clone();
        let stats = NoiseInjector::new(full_rates(), Some(3)).apply(&mut records);
        // Nothing to perturb on an all-zero row
        assert_eq!(stats.modified_rows, 0);
        assert_eq!(records[0], original);
    }

    #[test]
    fn test_same_seed_reproduces_noise() {
        let mut a: Vec<DailyActivityRecord> = (1..=50).map(|i| active_record(i, false)).collect();
        let mut b = a.clone();
        NoiseInjector::new(full_rates(), Some(21)).apply(&mut a);
        NoiseInjector::new(full_rates(), Some(21)).apply(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_statistics_count_field_groups() {
        let mut records: Vec<DailyActivityRecord> =
            (1..=100).map(|i| active_record(i, false)).collect();
        let stats = NoiseInjector::new(full_rates(), Some(13)).apply(&mut records);
        assert_eq!(stats.total_rows, 100);
        assert_eq!(stats.modified_rows, 100);
        assert_eq!(stats.burn_modifications, 100);
        assert_eq!(stats.print_modifications, 100);
        assert_eq!(stats.entry_time_modifications, 100);
    }
}
