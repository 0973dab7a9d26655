//! Geographic configuration
//!
//! Campus list, weighted origin-country and travel-destination tables, and
//! the hostility classification of destination countries.

/// Campus locations employees can be assigned to
pub const CAMPUSES: [&str; 3] = ["Campus A", "Campus B", "Campus C"];

/// Origin countries with relative frequency weights
pub const ORIGIN_COUNTRIES: [(&str, f64); 20] = [
    ("Israel", 0.46),
    ("Russia", 0.08),
    ("Ukraine", 0.07),
    ("USA", 0.05),
    ("France", 0.05),
    ("Ethiopia", 0.04),
    ("Morocco", 0.03),
    ("Argentina", 0.02),
    ("Germany", 0.02),
    ("UK", 0.02),
    ("India", 0.02),
    ("China", 0.02),
    ("South Africa", 0.02),
    ("Brazil", 0.015),
    ("Canada", 0.015),
    ("Romania", 0.015),
    ("Hungary", 0.01),
    ("Poland", 0.01),
    ("Turkey", 0.01),
    ("Georgia", 0.01),
];

/// Common travel destinations with relative frequency weights
pub const TRAVEL_COUNTRIES: [(&str, f64); 23] = [
    ("Turkey", 0.12),
    ("Greece", 0.11),
    ("Cyprus", 0.10),
    ("Italy", 0.08),
    ("USA", 0.10),
    ("UK", 0.07),
    ("France", 0.06),
    ("Germany", 0.06),
    ("UAE", 0.05),
    ("Thailand", 0.04),
    ("Spain", 0.04),
    ("Netherlands", 0.03),
    ("India", 0.02),
    ("China", 0.02),
    ("Japan", 0.02),
    ("Georgia", 0.02),
    ("Austria", 0.01),
    ("Switzerland", 0.01),
    ("Romania", 0.01),
    ("Ukraine", 0.01),
    ("South Korea", 0.01),
    ("Belgium", 0.005),
    ("Czech Republic", 0.005),
];

/// Destinations classified at hostility level 3 (highest threat)
pub const HOSTILE_LEVEL_3: [&str; 5] = ["Iran", "Syria", "Lebanon", "Iraq", "Yemen"];

/// Destinations classified at hostility level 2
pub const HOSTILE_LEVEL_2: [&str; 7] =
    ["Libya", "Afghanistan", "Pakistan", "Sudan", "Qatar", "Russia", "North Korea"];

/// Destinations classified at hostility level 1
pub const HOSTILE_LEVEL_1: [&str; 4] = ["Algeria", "Malaysia", "Kuwait", "Tunisia"];

/// The hostility level (0-3) of a destination country
pub fn hostility_level(country: &str) -> u8 {
    if HOSTILE_LEVEL_3.contains(&country) {
        3
    } else if HOSTILE_LEVEL_2.contains(&country) {
        2
    } else if HOSTILE_LEVEL_1.contains(&country) {
        1
    } else {
        0
    }
}

/// The hostile-country list for a given level (1-3)
pub fn hostile_countries(level: u8) -> &'static [&'static str] {
    match level {
        3 => &HOSTILE_LEVEL_3,
        2 => &HOSTILE_LEVEL_2,
        1 => &HOSTILE_LEVEL_1,
        _ => &[],
    }
}
