//! Configuration structures for the insider-threat simulator
//!
//! This module contains the simulation configuration structure and validation
//! logic, the CLI argument definitions, and the partial configuration-file
//! structure. Precedence is CLI arguments, then config file, then defaults.

use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Off-hours window constants.
///
/// The working week runs Sunday through Thursday; Friday and Saturday are the
/// weekend. Night hours cover 22:00 through 05:59.
pub mod off_hours {
    use chrono::{Datelike, NaiveDate, Weekday};

    /// First night hour (10 PM in 24-hour format)
    pub const NIGHT_START_HOUR: u32 = 22;

    /// Last night hour, inclusive (5 AM in 24-hour format)
    pub const NIGHT_END_HOUR: u32 = 5;

    /// Entries before this hour raise the early-entry flag
    pub const EARLY_ENTRY_HOUR: u32 = 6;

    /// Exits after this hour raise the late-exit flag
    pub const LATE_EXIT_HOUR: u32 = 22;

    /// Whether an entry at the given hour falls in the night window
    pub fn is_night_hour(hour: u32) -> bool {
        hour >= NIGHT_START_HOUR || hour <= NIGHT_END_HOUR
    }

    /// Whether the date falls on the weekend (Friday or Saturday)
    pub fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
    }
}

/// Rounding rule used when turning the false-positive rate into an employee
/// count during labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FalsePositiveRounding {
    /// Round to the nearest integer (0.45 -> 0, 0.55 -> 1)
    #[default]
    Nearest,
    /// Always round down
    Floor,
}

impl FalsePositiveRounding {
    /// Apply the rounding rule to a fractional employee count
    pub fn apply(&self, value: f64) -> usize {
        match self {
            Self::Nearest => value.round().max(0.0) as usize,
            Self::Floor => value.floor().max(0.0) as usize,
        }
    }
}

impl fmt::Display for FalsePositiveRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Floor => write!(f, "floor"),
        }
    }
}

impl FromStr for FalsePositiveRounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "floor" => Ok(Self::Floor),
            _ => Err(format!("Unknown rounding rule: {} (expected nearest or floor)", s)),
        }
    }
}

/// Per-field-group noise rates for the optional noise injection pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseRates {
    /// Fraction of rows receiving burn-field noise
    pub burn_rate: f64,
    /// Fraction of rows receiving print-field noise
    pub print_rate: f64,
    /// Fraction of rows receiving entry-time noise
    pub entry_time_rate: f64,
    /// Use Gaussian deltas instead of uniform ones
    pub use_gaussian: bool,
}

impl Default for NoiseRates {
    fn default() -> Self {
        Self { burn_rate: 0.05, print_rate: 0.05, entry_time_rate: 0.10, use_gaussian: false }
    }
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "insider-threat-simulator",
    version = "0.1.0",
    about = "Insider Threat Simulator - Generates a labeled synthetic employee-activity dataset",
    long_about = "Generates a per-employee, per-day behavioral activity table (building access, \
printing, document destruction, travel) with ground-truth maliciousness, day-level suspicion \
labels, and optional consistency-preserving noise.

EXAMPLES:
    # Run with default settings
    insider-threat-simulator

    # Use a configuration file
    insider-threat-simulator --config config.json

    # Override specific settings
    insider-threat-simulator --employee-count 500 --days 365 --seed 7

    # Generate configuration template
    insider-threat-simulator --print-config > my-config.json

    # Validate configuration without running
    insider-threat-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file format: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(short, long, help = "Configuration file path (JSON format)")]
    pub config: Option<String>,

    /// Number of employees to simulate
    #[arg(
        long,
        help = "Number of employees to simulate",
        long_help = "Total number of employees in the simulation. Must be greater than 0. Default: 200"
    )]
    pub employee_count: Option<usize>,

    /// Number of days to simulate
    #[arg(
        long,
        help = "Number of days to simulate",
        long_help = "Length of the simulated date range in days. Must be greater than 0. Default: 180"
    )]
    pub days: Option<usize>,

    /// First simulated date (YYYY-MM-DD)
    #[arg(long, help = "First simulated date (YYYY-MM-DD)")]
    pub start_date: Option<String>,

    /// Fraction of employees marked malicious (0.0-1.0)
    #[arg(
        long,
        help = "Fraction of employees marked malicious (0.0-1.0)",
        long_help = "Ground-truth malicious employee ratio. Range: 0.0-1.0. Default: 0.05 (5%)"
    )]
    pub malicious_ratio: Option<f64>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Probability that a malicious burn request cap exceeds the employee clearance (0.0-1.0)
    #[arg(long, help = "Over-clearance burn probability for malicious employees (0.0-1.0)")]
    pub clearance_breach_probability: Option<f64>,

    /// Fraction of non-malicious employees given a false-positive day (0.0-1.0)
    #[arg(long, help = "False-positive employee rate used by labeling (0.0-1.0)")]
    pub false_positive_rate: Option<f64>,

    /// Rounding rule for the false-positive employee count
    #[arg(long, help = "False-positive count rounding rule (nearest or floor)")]
    pub false_positive_rounding: Option<String>,

    /// Apply the noise-injection pass after labeling
    #[arg(long, help = "Apply the noise-injection pass after labeling")]
    pub add_noise: bool,

    /// Fraction of rows receiving burn-field noise (0.0-1.0)
    #[arg(long, help = "Burn noise rate (0.0-1.0)")]
    pub burn_noise_rate: Option<f64>,

    /// Fraction of rows receiving print-field noise (0.0-1.0)
    #[arg(long, help = "Print noise rate (0.0-1.0)")]
    pub print_noise_rate: Option<f64>,

    /// Fraction of rows receiving entry-time noise (0.0-1.0)
    #[arg(long, help = "Entry-time noise rate (0.0-1.0)")]
    pub entry_time_noise_rate: Option<f64>,

    /// Use Gaussian noise deltas instead of uniform ones
    #[arg(long, help = "Use Gaussian noise deltas instead of uniform ones")]
    pub gaussian_noise: bool,

    /// Output directory for exported files
    #[arg(long, help = "Output directory for exported files")]
    pub output_dir: Option<String>,

    /// Filename prefix for exported files
    #[arg(short, long, help = "Filename prefix for exported files")]
    pub output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running the simulation
    #[arg(long, help = "Validate configuration without running the simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of employees to simulate
    pub employee_count: Option<usize>,
    /// Number of days to simulate
    pub days: Option<usize>,
    /// First simulated date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Fraction of employees marked malicious (0.0-1.0)
    pub malicious_ratio: Option<f64>,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
    /// Probability that a malicious burn request cap exceeds the employee clearance
    pub clearance_breach_probability: Option<f64>,
    /// Strict labeling percentile (0.0-1.0)
    pub strict_percentile: Option<f64>,
    /// Soft labeling percentile (0.0-1.0)
    pub soft_percentile: Option<f64>,
    /// Fraction of non-malicious employees given a false-positive day
    pub false_positive_rate: Option<f64>,
    /// Rounding rule for the false-positive employee count
    pub false_positive_rounding: Option<FalsePositiveRounding>,
    /// Apply the noise-injection pass after labeling
    pub add_noise: Option<bool>,
    /// Noise rates per field group
    pub noise: Option<NoiseRates>,
    /// Output directory for exported files
    pub output_dir: Option<String>,
    /// Filename prefix for exported files
    pub output_prefix: Option<String>,
}

/// Configuration for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of employees to simulate
    pub employee_count: usize,
    /// Number of days to simulate
    pub days: usize,
    /// First simulated date
    pub start_date: NaiveDate,
    /// Fraction of employees marked malicious (0.0-1.0)
    pub malicious_ratio: f64,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
    /// Probability that a malicious burn request cap exceeds the employee clearance
    pub clearance_breach_probability: f64,
    /// Strict labeling percentile (default 0.95)
    pub strict_percentile: f64,
    /// Soft labeling percentile (default 0.75)
    pub soft_percentile: f64,
    /// Fraction of non-malicious employees given a false-positive day
    pub false_positive_rate: f64,
    /// Rounding rule for the false-positive employee count
    pub false_positive_rounding: FalsePositiveRounding,
    /// Apply the noise-injection pass after labeling
    pub add_noise: bool,
    /// Noise rates per field group
    pub noise: NoiseRates,
    /// Output directory for exported files
    pub output_dir: String,
    /// Filename prefix for exported files
    pub output_prefix: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            employee_count: 200,
            days: 180,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid default date"),
            malicious_ratio: 0.05,
            seed: None,
            clearance_breach_probability: 0.30,
            strict_percentile: 0.95,
            soft_percentile: 0.75,
            false_positive_rate: 0.05,
            false_positive_rounding: FalsePositiveRounding::Nearest,
            add_noise: false,
            noise: NoiseRates::default(),
            output_dir: "./output".to_string(),
            output_prefix: "insider_threat".to_string(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// A CLI value failed to parse
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Name of the offending field
        field: String,
        /// Parse failure detail
        message: String,
    },
}

/// Validation errors for the simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Employee count is invalid
    #[error("Employee count must be greater than 0, got {0}")]
    InvalidEmployeeCount(usize),

    /// Days count is invalid
    #[error("Days count must be greater than 0, got {0}")]
    InvalidDaysCount(usize),

    /// A ratio value is out of range
    #[error("Invalid ratio for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidRatio {
        /// Name of the field with the invalid ratio
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Labeling percentiles are inconsistent
    #[error("Soft percentile ({soft}) must be <= strict percentile ({strict})")]
    InvalidPercentileOrder {
        /// Configured soft percentile
        soft: f64,
        /// Configured strict percentile
        strict: f64,
    },

    /// Output prefix is empty
    #[error("Output prefix must not be empty")]
    EmptyOutputPrefix,
}

impl SimulationConfig {
    /// Build the effective configuration from CLI arguments, merging an
    /// optional configuration file underneath them.
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => Self::load_config_file(path)?,
            None => ConfigFile::default(),
        };

        let mut config = SimulationConfig::default();

        if let Some(v) = file.employee_count {
            config.employee_count = v;
        }
        if let Some(v) = file.days {
            config.days = v;
        }
        if let Some(v) = &file.start_date {
            config.start_date = parse_start_date(v)?;
        }
        if let Some(v) = file.malicious_ratio {
            config.malicious_ratio = v;
        }
        if file.seed.is_some() {
            config.seed = file.seed;
        }
        if let Some(v) = file.clearance_breach_probability {
            config.clearance_breach_probability = v;
        }
        if let Some(v) = file.strict_percentile {
            config.strict_percentile = v;
        }
        if let Some(v) = file.soft_percentile {
            config.soft_percentile = v;
        }
        if let Some(v) = file.false_positive_rate {
            config.false_positive_rate = v;
        }
        if let Some(v) = file.false_positive_rounding {
            config.false_positive_rounding = v;
        }
        if let Some(v) = file.add_noise {
            config.add_noise = v;
        }
        if let Some(v) = file.noise {
            config.noise = v;
        }
        if let Some(v) = file.output_dir {
            config.output_dir = v;
        }
        if let Some(v) = file.output_prefix {
            config.output_prefix = v;
        }

        // CLI arguments take precedence over the file
        if let Some(v) = args.employee_count {
            config.employee_count = v;
        }
        if let Some(v) = args.days {
            config.days = v;
        }
        if let Some(v) = &args.start_date {
            config.start_date = parse_start_date(v)?;
        }
        if let Some(v) = args.malicious_ratio {
            config.malicious_ratio = v;
        }
        if args.seed.is_some() {
            config.seed = args.seed;
        }
        if let Some(v) = args.clearance_breach_probability {
            config.clearance_breach_probability = v;
        }
        if let Some(v) = args.false_positive_rate {
            config.false_positive_rate = v;
        }
        if let Some(v) = &args.false_positive_rounding {
            config.false_positive_rounding =
                v.parse().map_err(|message| ConfigError::InvalidValue {
                    field: "false_positive_rounding".to_string(),
                    message,
                })?;
        }
        if args.add_noise {
            config.add_noise = true;
        }
        if let Some(v) = args.burn_noise_rate {
            config.noise.burn_rate = v;
        }
        if let Some(v) = args.print_noise_rate {
            config.noise.print_rate = v;
        }
        if let Some(v) = args.entry_time_noise_rate {
            config.noise.entry_time_rate = v;
        }
        if args.gaussian_noise {
            config.noise.use_gaussian = true;
        }
        if let Some(v) = args.output_dir {
            config.output_dir = v;
        }
        if let Some(v) = args.output {
            config.output_prefix = v;
        }

        Ok(config)
    }

    fn load_config_file(path: &str) -> Result<ConfigFile, ConfigError> {
        let p = Path::new(path);
        if !p.exists() {
            return Err(ConfigError::FileNotFound(path.to_string()));
        }
        match p.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                let contents = fs::read_to_string(p)?;
                Ok(serde_json::from_str(&contents)?)
            }
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.employee_count == 0 {
            return Err(ConfigValidationError::InvalidEmployeeCount(self.employee_count));
        }
        if self.days == 0 {
            return Err(ConfigValidationError::InvalidDaysCount(self.days));
        }

        let ratios = [
            ("malicious_ratio", self.malicious_ratio),
            ("clearance_breach_probability", self.clearance_breach_probability),
            ("strict_percentile", self.strict_percentile),
            ("soft_percentile", self.soft_percentile),
            ("false_positive_rate", self.false_positive_rate),
            ("noise.burn_rate", self.noise.burn_rate),
            ("noise.print_rate", self.noise.print_rate),
            ("noise.entry_time_rate", self.noise.entry_time_rate),
        ];
        for (field, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidRatio {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.soft_percentile > self.strict_percentile {
            return Err(ConfigValidationError::InvalidPercentileOrder {
                soft: self.soft_percentile,
                strict: self.strict_percentile,
            });
        }
        if self.output_prefix.is_empty() {
            return Err(ConfigValidationError::EmptyOutputPrefix);
        }

        Ok(())
    }

    /// The last simulated date (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + chrono::Duration::days(self.days as i64 - 1)
    }

    /// Serialize the configuration as pretty JSON
    pub fn print_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn parse_start_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ConfigError::InvalidValue {
        field: "start_date".to_string(),
        message: format!("{} (expected YYYY-MM-DD)", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.employee_count, 200);
        assert_eq!(config.days, 180);
        assert_eq!(config.malicious_ratio, 0.05);
    }

    #[test]
    fn test_validation_rejects_zero_counts() {
        let mut config = SimulationConfig::default();
        config.employee_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidEmployeeCount(0))
        ));

        let mut config = SimulationConfig::default();
        config.days = 0;
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidDaysCount(0))));
    }

    #[test]
    fn test_validation_rejects_out_of_range_ratio() {
        let mut config = SimulationConfig::default();
        config.malicious_ratio = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRatio { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_inverted_percentiles() {
        let mut config = SimulationConfig::default();
        config.soft_percentile = 0.97;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidPercentileOrder { .. })
        ));
    }

    #[test]
    fn test_end_date_is_inclusive() {
        let mut config = SimulationConfig::default();
        config.start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        config.days = 30;
        assert_eq!(config.end_date(), NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
    }

    #[test]
    fn test_false_positive_rounding_rules() {
        assert_eq!(FalsePositiveRounding::Nearest.apply(0.45), 0);
        assert_eq!(FalsePositiveRounding::Nearest.apply(0.5), 1);
        assert_eq!(FalsePositiveRounding::Floor.apply(0.95), 0);
        assert_eq!(FalsePositiveRounding::Floor.apply(3.9), 3);
    }

    #[test]
    fn test_off_hours_windows() {
        assert!(off_hours::is_night_hour(22));
        assert!(off_hours::is_night_hour(23));
        assert!(off_hours::is_night_hour(0));
        assert!(off_hours::is_night_hour(5));
        assert!(!off_hours::is_night_hour(6));
        assert!(!off_hours::is_night_hour(21));

        // 2024-01-05 is a Friday, 2024-01-07 a Sunday (working day)
        assert!(off_hours::is_weekend(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
        assert!(off_hours::is_weekend(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()));
        assert!(!off_hours::is_weekend(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = SimulationConfig::default();
        let json = config.print_json().unwrap();
        let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.employee_count, config.employee_count);
        assert_eq!(parsed.start_date, config.start_date);
        assert_eq!(parsed.false_positive_rounding, config.false_positive_rounding);
    }

    #[test]
    fn test_partial_config_file_parses() {
        let json = r#"{ "employee_count": 50, "seed": 7 }"#;
        let file: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.employee_count, Some(50));
        assert_eq!(file.seed, Some(7));
        assert!(file.days.is_none());
    }

    #[test]
    fn test_parse_start_date() {
        assert!(parse_start_date("2024-06-01").is_ok());
        assert!(parse_start_date("06/01/2024").is_err());
    }
}
