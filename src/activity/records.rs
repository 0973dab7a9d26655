//! Daily activity records
//!
//! The per-day output records of the four activity generators and the
//! composite row assembled by the orchestrator. Inactive days are represented
//! by explicit all-zero records rather than missing rows, so downstream
//! consumers see absence as signal.

use crate::employee::EmployeeProfile;
use crate::types::{BehavioralGroup, EmployeeId};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Serde helper for `Option<NaiveTime>` in the `HH:MM` wire form
mod hhmm_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_some(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        match value {
            Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// One day of building-access activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessActivity {
    /// Number of building entries
    pub num_entries: u32,
    /// Number of building exits
    pub num_exits: u32,
    /// First badge-in time, absent on inactive days
    #[serde(with = "hhmm_format")]
    pub first_entry_time: Option<NaiveTime>,
    /// Last badge-out time, absent on inactive days
    #[serde(with = "hhmm_format")]
    pub last_exit_time: Option<NaiveTime>,
    /// Minutes between first entry and last exit
    pub total_presence_minutes: u32,
    /// First entry fell in the night window (22:00-05:59)
    pub entered_during_night_hours: bool,
    /// Entry before 06:00
    pub early_entry_flag: bool,
    /// Exit after 22:00
    pub late_exit_flag: bool,
    /// Entry on Friday or Saturday
    pub entry_during_weekend: bool,
    /// Number of distinct campuses badged into
    pub num_unique_campus: u32,
    /// Badged into a campus other than the home campus
    pub accessed_other_campus: bool,
}

impl AccessActivity {
    /// All-zero record for a day without building presence
    pub fn empty() -> Self {
        Self {
            num_entries: 0,
            num_exits: 0,
            first_entry_time: None,
            last_exit_time: None,
            total_presence_minutes: 0,
            entered_during_night_hours: false,
            early_entry_flag: false,
            late_exit_flag: false,
            entry_during_weekend: false,
            num_unique_campus: 0,
            accessed_other_campus: false,
        }
    }

    /// Whether the employee was present at all
    pub fn is_present(&self) -> bool {
        self.num_entries > 0
    }
}

/// One day of printing activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintActivity {
    /// Number of print commands issued
    pub num_print_commands: u32,
    /// Total pages printed
    pub total_printed_pages: u32,
    /// Print commands issued during off-hours
    pub num_print_commands_off_hours: u32,
    /// Pages printed during off-hours
    pub num_printed_pages_off_hours: u32,
    /// Color pages
    pub num_color_prints: u32,
    /// Black-and-white pages
    pub num_bw_prints: u32,
    /// Fraction of color pages, derived from the final counts
    pub ratio_color_prints: f64,
    /// Printed from a campus other than the home campus
    pub printed_from_other_campus: bool,
    /// Number of distinct campuses printed from
    pub print_campuses: u32,
}

impl PrintActivity {
    /// All-zero record for a day without printing
    pub fn empty() -> Self {
        Self {
            num_print_commands: 0,
            total_printed_pages: 0,
            num_print_commands_off_hours: 0,
            num_printed_pages_off_hours: 0,
            num_color_prints: 0,
            num_bw_prints: 0,
            ratio_color_prints: 0.0,
            printed_from_other_campus: false,
            print_campuses: 0,
        }
    }
}

/// One day of document-destruction activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnActivity {
    /// Number of burn requests
    pub num_burn_requests: u32,
    /// Highest classification level among the requests (0 when none)
    pub max_request_classification: u8,
    /// Mean classification level among the requests (0 when none)
    pub avg_request_classification: f64,
    /// Burn requests issued during off-hours
    pub num_burn_requests_off_hours: u32,
    /// Total burned volume in MB
    pub total_burn_volume_mb: u32,
    /// Total number of burned files
    pub total_files_burned: u32,
    /// Burned from a campus other than the home campus
    pub burned_from_other_campus: bool,
    /// Number of distinct campuses burned from
    pub burn_campuses: u32,
}

impl BurnActivity {
    /// All-zero record for a day without burn activity
    pub fn empty() -> Self {
        Self {
            num_burn_requests: 0,
            max_request_classification: 0,
            avg_request_classification: 0.0,
            num_burn_requests_off_hours: 0,
            total_burn_volume_mb: 0,
            total_files_burned: 0,
            burned_from_other_campus: false,
            burn_campuses: 0,
        }
    }
}

/// One day of travel activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelActivity {
    /// The employee is abroad on this day
    pub is_abroad: bool,
    /// Day number within the current trip (0 when not traveling)
    pub trip_day_number: u32,
    /// Destination country, absent when not traveling
    pub country_name: Option<String>,
    /// The destination is classified hostile (level >= 1)
    pub is_hostile_country_trip: bool,
    /// Hostility level of the destination (0-3)
    pub hostility_country_level: u8,
    /// The trip is an official business trip
    pub is_official_trip: bool,
    /// The destination equals the employee's origin country
    pub is_origin_country_trip: bool,
}

impl TravelActivity {
    /// Zero record for a day at home
    pub fn empty() -> Self {
        Self {
            is_abroad: false,
            trip_day_number: 0,
            country_name: None,
            is_hostile_country_trip: false,
            hostility_country_level: 0,
            is_official_trip: false,
            is_origin_country_trip: false,
        }
    }
}

/// Composite per-employee, per-day record.
///
/// Exactly one record exists for every (employee, date) pair in the simulated
/// range, all-zero records included. The export shape flattens the four
/// activity sub-records into one flat row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivityRecord {
    /// Employee identifier
    pub employee_id: EmployeeId,
    /// Simulated date
    pub date: NaiveDate,
    /// Department name
    pub employee_department: String,
    /// Home campus
    pub employee_campus: String,
    /// Job position
    pub employee_position: String,
    /// Years in the role
    pub employee_seniority_years: u32,
    /// Security clearance level (1-4)
    pub employee_classification_level: u8,
    /// Behavioral group
    pub behavioral_group: BehavioralGroup,
    /// Country of origin
    pub employee_origin_country: String,
    /// Employee-level ground truth
    pub is_malicious: bool,
    /// Building-access activity
    #[serde(flatten)]
    pub access: AccessActivity,
    /// Printing activity
    #[serde(flatten)]
    pub print: PrintActivity,
    /// Document-destruction activity
    #[serde(flatten)]
    pub burn: BurnActivity,
    /// Travel activity
    #[serde(flatten)]
    pub travel: TravelActivity,
    /// Composite travel risk flag for the day
    pub risk_travel_indicator: bool,
    /// Set by the noise injector when any field was perturbed
    pub row_modified: bool,
    /// Human-readable noise change log, empty when untouched
    pub modification_details: String,
}

impl DailyActivityRecord {
    /// Assemble a record from the day's generator outputs
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile: &EmployeeProfile,
        date: NaiveDate,
        access: AccessActivity,
        print: PrintActivity,
        burn: BurnActivity,
        travel: TravelActivity,
        risk_travel_indicator: bool,
    ) -> Self {
        Self {
            employee_id: profile.employee_id,
            date,
            employee_department: profile.department.clone(),
            employee_campus: profile.campus.clone(),
            employee_position: profile.position.clone(),
            employee_seniority_years: profile.seniority_years,
            employee_classification_level: profile.classification_level,
            behavioral_group: profile.behavioral_group,
            employee_origin_country: profile.origin_country.clone(),
            is_malicious: profile.is_malicious,
            access,
            print,
            burn,
            travel,
            risk_travel_indicator,
            row_modified: false,
            modification_details: String::new(),
        }
    }

    /// Whether any off-hours print or burn activity occurred on this day
    pub fn has_off_hours_activity(&self) -> bool {
        self.print.num_print_commands_off_hours > 0 || self.burn.num_burn_requests_off_hours > 0
    }

    /// The first-entry hour, when present
    pub fn first_entry_hour(&self) -> Option<u32> {
        self.access.first_entry_time.map(|t| t.hour())
    }
}
