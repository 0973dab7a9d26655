//! Generation run statistics
//!
//! Aggregate counters accumulated while the orchestrator assembles the
//! activity table, reported at the end of a run.

use crate::activity::DailyActivityRecord;
use serde::{Deserialize, Serialize};

/// Counters describing one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatistics {
    /// Number of employees simulated
    pub total_employees: usize,
    /// Number of employees carrying the malicious ground truth
    pub malicious_employees: usize,
    /// Number of simulated days per employee
    pub days: usize,
    /// Total rows in the activity table
    pub total_records: usize,
    /// Days with building presence
    pub presence_days: usize,
    /// Days spent abroad
    pub abroad_days: usize,
    /// Days with any printing
    pub print_days: usize,
    /// Days with any burn activity
    pub burn_days: usize,
    /// Days with off-hours print or burn activity
    pub off_hours_days: usize,
    /// Days with the travel risk indicator raised
    pub risk_indicator_days: usize,
}

impl GenerationStatistics {
    /// Create statistics for a run over the given population
    pub fn new(total_employees: usize, malicious_employees: usize, days: usize) -> Self {
        Self { total_employees, malicious_employees, days, ..Self::default() }
    }

    /// Fold one generated record into the counters
    pub fn record(&mut self, record: &DailyActivityRecord) {
        self.total_records += 1;
        if record.access.is_present() {
            self.presence_days += 1;
        }
        if record.travel.is_abroad {
            self.abroad_days += 1;
        }
        if record.print.num_print_commands > 0 {
            self.print_days += 1;
        }
        if record.burn.num_burn_requests > 0 {
            self.burn_days += 1;
        }
        if record.has_off_hours_activity() {
            self.off_hours_days += 1;
        }
        if record.risk_travel_indicator {
            self.risk_indicator_days += 1;
        }
    }

    /// Expected number of rows for a complete grid
    pub fn expected_records(&self) -> usize {
        self.total_employees * self.days
    }

    /// Fraction of days with building presence
    pub fn presence_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.presence_days as f64 / self.total_records as f64
        }
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} records ({} employees x {} days): {} presence days, {} abroad, {} print, {} burn, {} off-hours, {} risk-flagged",
            self.total_records,
            self.total_employees,
            self.days,
            self.presence_days,
            self.abroad_days,
            self.print_days,
            self.burn_days,
            self.off_hours_days,
            self.risk_indicator_days
        )
    }
}
