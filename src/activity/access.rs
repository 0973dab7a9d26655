//! Building-access activity generation
//!
//! Simulates one employee-day of badge activity: entry/exit counts, first
//! entry and last exit sampled from the group's work-hour distribution,
//! presence minutes, and the timing flags (early, late, weekend, night).
//! Abroad days always yield the all-zero record; the abroad decision belongs
//! to the travel generator and is threaded in by the orchestrator.

use crate::activity::records::AccessActivity;
use crate::activity::sampling;
use crate::employee::EmployeeProfile;
use crate::patterns::PatternTable;
use crate::simulation::SimulationResult;
use crate::types::{off_hours, BehavioralGroup};
use chrono::{NaiveDate, NaiveTime, Timelike};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::trace;

/// Probability of a random absence on an otherwise workable day
const ABSENCE_PROBABILITY: f64 = 0.05;

/// Earliest clamped first-entry hour
const MIN_START_HOUR: f64 = 6.0;

/// Latest clamped first-entry hour
const MAX_START_HOUR: f64 = 12.0;

/// Latest clamped last-exit hour
const MAX_END_HOUR: f64 = 22.0;

/// Minimum workday length in hours
const MIN_WORK_DURATION_HOURS: f64 = 4.0;

/// Base probability of badging into a second campus
const CROSS_CAMPUS_PROBABILITY: f64 = 0.02;

/// Elevated cross-campus probability for malicious employees
const MALICIOUS_CROSS_CAMPUS_PROBABILITY: f64 = 0.15;

/// Probability of multiple re-entries for malicious employees
const MALICIOUS_MULTI_ENTRY_PROBABILITY: f64 = 0.2;

/// Generates daily building-access activity
#[derive(Debug, Clone)]
pub struct AccessActivityGenerator {
    patterns: PatternTable,
}

impl AccessActivityGenerator {
    /// Create a generator over the given pattern table
    pub fn new(patterns: PatternTable) -> Self {
        Self { patterns }
    }

    /// Generate one day of access activity.
    ///
    /// Returns the all-zero record when the employee is abroad, absent, or
    /// skipping a weekend day.
    pub fn generate(
        &self,
        profile: &EmployeeProfile,
        date: NaiveDate,
        is_abroad: bool,
        rng: &mut StdRng,
    ) -> SimulationResult<AccessActivity> {
        if is_abroad {
            return Ok(AccessActivity::empty());
        }

        if rng.gen::<f64>() < ABSENCE_PROBABILITY {
            trace!("{} absent on {}", profile.employee_id, date);
            return Ok(AccessActivity::empty());
        }

        if !self.should_work_weekend(profile, date, rng)? {
            return Ok(AccessActivity::empty());
        }

        let (start_hour, end_hour) = self.sample_work_hours(profile, rng)?;
        Ok(self.build_record(profile, date, start_hour, end_hour, rng))
    }

    /// Sample first-entry and last-exit hours from the group distribution.
    ///
    /// Malicious employees get a wider spread and a slightly higher chance of
    /// the extreme early/late override.
    fn sample_work_hours(
        &self,
        profile: &EmployeeProfile,
        rng: &mut StdRng,
    ) -> SimulationResult<(f64, f64)> {
        let pattern = self.patterns.get(profile.behavioral_group)?;
        let hours = &pattern.work_hours;

        let std_multiplier = if profile.is_malicious {
            self.patterns.malicious.work_hours_std_multiplier
        } else {
            1.0
        };

        let mut start_hour =
            sampling::normal(rng, hours.start_mean, hours.start_std * std_multiplier);
        let mut end_hour = sampling::normal(rng, hours.end_mean, hours.end_std * std_multiplier);

        start_hour = start_hour.clamp(MIN_START_HOUR, MAX_START_HOUR);
        end_hour = end_hour.min(MAX_END_HOUR).max(start_hour + MIN_WORK_DURATION_HOURS);

        let extreme_probability = if profile.is_malicious {
            self.patterns.malicious.extreme_hours_probability
        } else {
            self.patterns.regular.extreme_hours_probability
        };
        if rng.gen::<f64>() < extreme_probability {
            if rng.gen::<f64>() < 0.5 {
                start_hour = rng.gen_range(5.0..7.0);
            } else {
                end_hour = rng.gen_range(20.0..23.0);
            }
        }

        Ok((start_hour, end_hour))
    }

    /// Whether the employee comes in on this date.
    ///
    /// Sunday through Thursday are working days. On the weekend the security
    /// group follows its shift probability, malicious employees have an
    /// elevated chance, everyone else a low base chance.
    fn should_work_weekend(
        &self,
        profile: &EmployeeProfile,
        date: NaiveDate,
        rng: &mut StdRng,
    ) -> SimulationResult<bool> {
        if !off_hours::is_weekend(date) {
            return Ok(true);
        }

        let pattern = self.patterns.get(profile.behavioral_group)?;
        if profile.behavioral_group == BehavioralGroup::E {
            let shift_probability = pattern.weekend_work.unwrap_or(0.6);
            return Ok(rng.gen::<f64>() < shift_probability);
        }

        if profile.is_malicious
            && rng.gen::<f64>() < self.patterns.malicious.weekend_work_probability
        {
            return Ok(true);
        }

        Ok(rng.gen::<f64>() < self.patterns.regular.weekend_work_probability)
    }

    fn build_record(
        &self,
        profile: &EmployeeProfile,
        date: NaiveDate,
        start_hour: f64,
        end_hour: f64,
        rng: &mut StdRng,
    ) -> AccessActivity {
        let first_entry = time_from_decimal_hours(start_hour);
        let last_exit = time_from_decimal_hours(end_hour);

        let num_entries = if profile.is_malicious
            && rng.gen::<f64>() < MALICIOUS_MULTI_ENTRY_PROBABILITY
        {
            weighted_pick(rng, &[(2, 0.5), (3, 0.3), (4, 0.2)])
        } else {
            weighted_pick(rng, &[(1, 0.8), (2, 0.2)])
        };

        let total_presence_minutes =
            (last_exit - first_entry).num_minutes().max(0) as u32;

        let (num_unique_campus, accessed_other_campus) = self.sample_campuses(profile, rng);

        let late_exit_threshold =
            NaiveTime::from_hms_opt(off_hours::LATE_EXIT_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);

        AccessActivity {
            num_entries,
            num_exits: num_entries,
            first_entry_time: Some(first_entry),
            last_exit_time: Some(last_exit),
            total_presence_minutes,
            entered_during_night_hours: off_hours::is_night_hour(first_entry.hour()),
            early_entry_flag: first_entry.hour() < off_hours::EARLY_ENTRY_HOUR,
            late_exit_flag: last_exit > late_exit_threshold,
            entry_during_weekend: off_hours::is_weekend(date),
            num_unique_campus,
            accessed_other_campus,
        }
    }

    /// Sample secondary-campus access independently of the work hours
    fn sample_campuses(&self, profile: &EmployeeProfile, rng: &mut StdRng) -> (u32, bool) {
        if profile.is_malicious && rng.gen::<f64>() < MALICIOUS_CROSS_CAMPUS_PROBABILITY {
            let campuses = if rng.gen::<f64>() < 0.5 { 2 } else { 3 };
            (campuses, true)
        } else if rng.gen::<f64>() < CROSS_CAMPUS_PROBABILITY {
            (2, true)
        } else {
            (1, false)
        }
    }
}

/// Convert decimal hours into a clock time, clamped to the same day
fn time_from_decimal_hours(hours: f64) -> NaiveTime {
    let clamped = hours.clamp(0.0, 23.983);
    let hour = clamped.floor() as u32;
    let minute = ((clamped - clamped.floor()) * 60.0).floor().min(59.0) as u32;
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Pick one value from a small weighted table
fn weighted_pick(rng: &mut StdRng, table: &[(u32, f64)]) -> u32 {
    let total: f64 = table.iter().map(|(_, w)| w).sum();
    let mut draw = rng.gen::<f64>() * total;
    for (value, weight) in table {
        if draw < *weight {
            return *value;
        }
        draw -= weight;
    }
    table.last().map(|(v, _)| *v).unwrap_or(0)
}
