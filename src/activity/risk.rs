//! Risk indicator composition
//!
//! Derives the composite travel risk flag from one day's activity outputs.
//! This is a pure function: it holds no state and samples nothing.

use crate::activity::records::{BurnActivity, PrintActivity, TravelActivity};
use crate::employee::EmployeeProfile;

/// Hostility level at which an unofficial trip becomes risk-relevant
const UNOFFICIAL_TRIP_HOSTILITY_THRESHOLD: u8 = 2;

/// Clearance level at which any hostile-country trip becomes risk-relevant
const HIGH_CLEARANCE_THRESHOLD: u8 = 3;

/// Compute the day's travel risk indicator.
///
/// The flag is raised when either rule matches (the rules are OR-combined):
/// 1. the employee is on an unofficial trip to a country with hostility
///    level >= 2 and the same day shows off-hours burn or print activity;
/// 2. the employee is on any hostile-country trip while holding
///    classification level >= 3.
pub fn risk_travel_indicator(
    profile: &EmployeeProfile,
    travel: &TravelActivity,
    print: &PrintActivity,
    burn: &BurnActivity,
) -> bool {
    if !travel.is_abroad {
        return false;
    }

    let off_hours_activity =
        print.num_print_commands_off_hours > 0 || burn.num_burn_requests_off_hours > 0;
    let unofficial_hostile_with_activity = !travel.is_official_trip
        && travel.hostility_country_level >= UNOFFICIAL_TRIP_HOSTILITY_THRESHOLD
        && off_hours_activity;

    let hostile_with_high_clearance = travel.is_hostile_country_trip
        && profile.classification_level >= HIGH_CLEARANCE_THRESHOLD;

    unofficial_hostile_with_activity || hostile_with_high_clearance
}
