//! Travel activity generation
//!
//! The one stateful generator: multi-day trips carry state from day to day.
//! The state lives in an explicit `TripState` owned by the orchestrator (one
//! per employee) and threaded through each call, so the generator itself
//! stays stateless and the day-by-day sequence is deterministic and testable
//! in isolation. Days for one employee must be generated in chronological
//! order; employees are independent of each other.

use crate::activity::records::TravelActivity;
use crate::employee::EmployeeProfile;
use crate::patterns::geography::{hostile_countries, hostility_level, TRAVEL_COUNTRIES};
use crate::patterns::PatternTable;
use crate::simulation::{SimulationError, SimulationResult};
use chrono::NaiveDate;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Shortest trip in days
const MIN_TRIP_DURATION_DAYS: u32 = 1;

/// Longest trip in days
const MAX_TRIP_DURATION_DAYS: u32 = 14;

/// Per-employee trip state carried across sequential days.
///
/// At most one trip is active at a time; `day_number` increases contiguously
/// while `active` and resets to 0 the day after the trip ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripState {
    /// A trip is in progress
    pub active: bool,
    /// Destination of the active trip
    pub destination_country: Option<String>,
    /// Hostility level of the destination (0-3)
    pub hostility_level: u8,
    /// The active trip is official
    pub is_official: bool,
    /// The destination equals the employee's origin country
    pub is_origin_country: bool,
    /// Day number within the active trip (1-based; 0 when idle)
    pub day_number: u32,
    /// Days left on the trip, counting today
    pub remaining_days: u32,
}

impl TripState {
    /// A state with no trip in progress
    pub fn idle() -> Self {
        Self {
            active: false,
            destination_country: None,
            hostility_level: 0,
            is_official: false,
            is_origin_country: false,
            day_number: 0,
            remaining_days: 0,
        }
    }

    fn reset(&mut self) {
        *self = Self::idle();
    }
}

impl Default for TripState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Generates daily travel activity and advances the per-employee trip state
#[derive(Debug, Clone)]
pub struct TravelActivityGenerator {
    patterns: PatternTable,
}

impl TravelActivityGenerator {
    /// Create a generator over the given pattern table
    pub fn new(patterns: PatternTable) -> Self {
        Self { patterns }
    }

    /// Generate one day of travel activity, mutating the trip state.
    ///
    /// Must be called once per day in chronological order for each employee.
    /// The abroad decision made here is authoritative for the whole day: the
    /// access/print/burn generators receive it from the orchestrator and
    /// never decide abroad status themselves.
    pub fn generate(
        &self,
        profile: &EmployeeProfile,
        date: NaiveDate,
        state: &mut TripState,
        rng: &mut StdRng,
    ) -> SimulationResult<TravelActivity> {
        if state.active {
            return self.continue_trip(profile, date, state);
        }

        if self.should_start_trip(profile, rng)? {
            return self.start_trip(profile, date, state, rng);
        }

        Ok(TravelActivity::empty())
    }

    /// Advance an ongoing trip by one day
    fn continue_trip(
        &self,
        profile: &EmployeeProfile,
        date: NaiveDate,
        state: &mut TripState,
    ) -> SimulationResult<TravelActivity> {
        if state.remaining_days == 0 {
            return Err(SimulationError::state_consistency(
                profile.employee_id,
                "active trip with no remaining days",
            ));
        }
        if state.day_number == 0 {
            return Err(SimulationError::state_consistency(
                profile.employee_id,
                "active trip with day_number 0",
            ));
        }

        state.day_number += 1;
        let record = self.record_from_state(state);
        state.remaining_days -= 1;
        if state.remaining_days == 0 {
            trace!("{} trip to {:?} ends on {}", profile.employee_id, record.country_name, date);
            state.reset();
        }
        Ok(record)
    }

    fn should_start_trip(
        &self,
        profile: &EmployeeProfile,
        rng: &mut StdRng,
    ) -> SimulationResult<bool> {
        let pattern = self.patterns.get(profile.behavioral_group)?;
        let likelihood = if profile.is_malicious {
            pattern.travel_likelihood * self.patterns.malicious.travel_multiplier
        } else {
            pattern.travel_likelihood
        };
        Ok(rng.gen::<f64>() < likelihood)
    }

    /// Start a new trip and emit its first day
    fn start_trip(
        &self,
        profile: &EmployeeProfile,
        date: NaiveDate,
        state: &mut TripState,
        rng: &mut StdRng,
    ) -> SimulationResult<TravelActivity> {
        let destination = self.choose_destination(profile.is_malicious, rng)?;
        let hostility = hostility_level(&destination);
        let is_origin_country = destination == profile.origin_country;
        let is_official = self.sample_official_flag(profile, hostility, is_origin_country, rng);
        let duration = rng.gen_range(MIN_TRIP_DURATION_DAYS..=MAX_TRIP_DURATION_DAYS);

        debug!(
            "{} starts {} {}-day trip to {} on {} (hostility {})",
            profile.employee_id,
            if is_official { "an official" } else { "a personal" },
            duration,
            destination,
            date,
            hostility
        );

        state.active = true;
        state.destination_country = Some(destination);
        state.hostility_level = hostility;
        state.is_official = is_official;
        state.is_origin_country = is_origin_country;
        state.day_number = 1;
        state.remaining_days = duration;

        let record = self.record_from_state(state);
        state.remaining_days -= 1;
        if state.remaining_days == 0 {
            state.reset();
        }
        Ok(record)
    }

    /// Sample a destination; malicious employees are biased toward hostile
    /// countries, everyone else mostly draws from the weighted common table.
    fn choose_destination(
        &self,
        is_malicious: bool,
        rng: &mut StdRng,
    ) -> SimulationResult<String> {
        let draw = rng.gen::<f64>();
        let hostile_level = if is_malicious {
            if draw < 0.15 {
                Some(3u8)
            } else if draw < 0.25 {
                Some(2)
            } else if draw < 0.35 {
                Some(1)
            } else {
                None
            }
        } else if draw < 0.02 {
            Some(1)
        } else if draw < 0.03 {
            Some(2)
        } else if draw < 0.035 {
            Some(3)
        } else {
            None
        };

        if let Some(level) = hostile_level {
            let countries = hostile_countries(level);
            let country = countries
                .choose(rng)
                .ok_or_else(|| {
                    SimulationError::configuration(format!(
                        "no countries configured at hostility level {}",
                        level
                    ))
                })?;
            return Ok((*country).to_string());
        }

        let weights = WeightedIndex::new(TRAVEL_COUNTRIES.iter().map(|(_, w)| *w))
            .map_err(|e| {
                SimulationError::configuration(format!("invalid travel-country weights: {}", e))
            })?;
        Ok(TRAVEL_COUNTRIES[weights.sample(rng)].0.to_string())
    }

    /// Sample the official-vs-personal flag.
    ///
    /// Malicious employees start from a lower official-trip base probability;
    /// origin-country trips and hostile destinations both dampen it further.
    fn sample_official_flag(
        &self,
        profile: &EmployeeProfile,
        hostility: u8,
        is_origin_country: bool,
        rng: &mut StdRng,
    ) -> bool {
        let base = if profile.is_malicious {
            self.patterns.malicious.official_trip_probability
        } else {
            self.patterns.regular.official_trip_probability
        };
        let mut is_official = rng.gen::<f64>() < base;

        if is_origin_country && rng.gen::<f64>() < 0.6 {
            is_official = false;
        }
        if hostility > 0 {
            let keep_official = 0.8f64.powi(i32::from(hostility));
            if rng.gen::<f64>() > keep_official {
                is_official = false;
            }
        }
        is_official
    }

    fn record_from_state(&self, state: &TripState) -> TravelActivity {
        TravelActivity {
            is_abroad: true,
            trip_day_number: state.day_number,
            country_name: state.destination_country.clone(),
            is_hostile_country_trip: state.hostility_level > 0,
            hostility_country_level: state.hostility_level,
            is_official_trip: state.is_official,
            is_origin_country_trip: state.is_origin_country,
        }
    }
}
