//! Composite suspicion scoring
//!
//! Phase one of the daily labeling algorithm: every row of the finished
//! activity table receives a composite score built from population-normalized
//! off-hours activity, burn volume, burn classification, and the travel risk
//! indicator. Normalization uses population maxima, so scoring requires the
//! complete table and cannot run row-by-row during generation.

use crate::activity::DailyActivityRecord;
use serde::{Deserialize, Serialize};

/// Weights of the composite suspicion score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the normalized off-hours activity volume
    pub off_hours: f64,
    /// Weight of the normalized burn volume
    pub burn_volume: f64,
    /// Weight of the normalized burn classification level
    pub burn_classification: f64,
    /// Weight of the travel risk indicator
    pub travel_risk: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { off_hours: 0.35, burn_volume: 0.25, burn_classification: 0.15, travel_risk: 0.25 }
    }
}

/// Highest classification level, used to normalize the classification term
const MAX_CLASSIFICATION_LEVEL: f64 = 4.0;

/// Raw off-hours activity volume of one row: off-hours print commands and
/// burn requests plus the access timing flags.
fn off_hours_volume(record: &DailyActivityRecord) -> f64 {
    let mut volume = f64::from(record.print.num_print_commands_off_hours)
        + f64::from(record.burn.num_burn_requests_off_hours);
    if record.access.entered_during_night_hours {
        volume += 1.0;
    }
    if record.access.early_entry_flag {
        volume += 1.0;
    }
    if record.access.late_exit_flag {
        volume += 1.0;
    }
    volume
}

/// Compute the composite score of every row.
///
/// The returned vector is index-aligned with the input slice.
pub fn compute_scores(records: &[DailyActivityRecord], weights: &ScoreWeights) -> Vec<f64> {
    let max_off_hours = records
        .iter()
        .map(off_hours_volume)
        .fold(0.0f64, f64::max)
        .max(1.0);
    let max_burn_volume = records
        .iter()
        .map(|r| f64::from(r.burn.total_burn_volume_mb))
        .fold(0.0f64, f64::max)
        .max(1.0);

    records
        .iter()
        .map(|record| {
            let off_term = off_hours_volume(record) / max_off_hours;
            let volume_term = f64::from(record.burn.total_burn_volume_mb) / max_burn_volume;
            let classification_term =
                f64::from(record.burn.max_request_classification) / MAX_CLASSIFICATION_LEVEL;
            let travel_term = if record.risk_travel_indicator { 1.0 } else { 0.0 };

            weights.off_hours * off_term
                + weights.burn_volume * volume_term
                + weights.burn_classification * classification_term
                + weights.travel_risk * travel_term
        })
        .collect()
}

/// Linear-interpolation percentile of a sorted slice.
///
/// `p` is a fraction in [0, 1]; the slice must be sorted ascending and
/// non-empty.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = rank - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
