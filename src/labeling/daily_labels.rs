//! Daily label creation
//!
//! Phase two of the pipeline: turns the employee-level ground truth of the
//! finished activity table into day-level suspicion labels. The algorithm is
//! an explicit reduce-then-map: the two percentile thresholds are computed
//! once over the whole population (the single synchronization barrier of the
//! pipeline) and are read-only afterwards, so the per-row assignment and the
//! per-employee expansion could run concurrently once they exist.
//!
//! Steps: score every row, derive the strict (95th percentile) and soft
//! (75th percentile) thresholds, mark strict days for malicious employees,
//! expand to adjacent days at the soft threshold, then inject seeded false
//! positives among non-malicious employees.

use crate::activity::DailyActivityRecord;
use crate::labeling::score::{compute_scores, percentile, ScoreWeights};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{DetectionTier, EmployeeId, FalsePositiveRounding, SimulationConfig};
use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, instrument};

/// Seed stream offset so label sampling is decoupled from generation
const LABELING_STREAM: u64 = 0x4c_41_42;

/// One day-level suspicion label, joinable to the activity table on
/// (employee_id, date). Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLabel {
    /// Employee identifier
    pub employee_id: EmployeeId,
    /// Simulated date
    pub date: NaiveDate,
    /// The day is flagged suspicious
    pub day_suspicious: bool,
    /// Confidence tier of the flag
    pub detection_tier: DetectionTier,
    /// The flag is an injected false positive
    pub is_false_positive: bool,
}

/// The two population-relative score thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelThresholds {
    /// Soft (75th percentile) threshold
    pub soft: f64,
    /// Strict (95th percentile) threshold
    pub strict: f64,
}

/// Summary counters of one labeling pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelingStatistics {
    /// Rows labeled
    pub total_rows: usize,
    /// Strict-tier days
    pub strict_days: usize,
    /// Soft-tier days from temporal expansion
    pub expanded_days: usize,
    /// Injected false-positive days
    pub false_positive_days: usize,
    /// Non-malicious employees selected for false positives
    pub false_positive_employees: usize,
}

/// The complete label table for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTable {
    labels: Vec<DailyLabel>,
    /// Thresholds the labels were derived from
    pub thresholds: LabelThresholds,
    /// Labeling summary counters
    pub statistics: LabelingStatistics,
}

impl LabelTable {
    /// The labels, index-aligned with the activity table they were built from
    pub fn labels(&self) -> &[DailyLabel] {
        &self.labels
    }

    /// Number of label rows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Look up the label of one (employee, date) pair
    pub fn get(&self, employee_id: EmployeeId, date: NaiveDate) -> Option<&DailyLabel> {
        self.labels.iter().find(|l| l.employee_id == employee_id && l.date == date)
    }
}

/// Creates the day-level label table from a complete activity table
#[derive(Debug, Clone)]
pub struct DailyLabelCreator {
    strict_percentile: f64,
    soft_percentile: f64,
    false_positive_rate: f64,
    false_positive_rounding: FalsePositiveRounding,
    seed: Option<u64>,
    weights: ScoreWeights,
}

impl DailyLabelCreator {
    /// Create a label creator from the run configuration
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            strict_percentile: config.strict_percentile,
            soft_percentile: config.soft_percentile,
            false_positive_rate: config.false_positive_rate,
            false_positive_rounding: config.false_positive_rounding,
            seed: config.seed,
            weights: ScoreWeights::default(),
        }
    }

    /// Override the score weights
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Create labels for the complete activity table.
    ///
    /// Requires at least two rows: percentile thresholds over fewer rows are
    /// meaningless and are rejected with an insufficient-data error instead
    /// of producing a degenerate label set.
    #[instrument(skip(self, records), fields(rows = records.len()))]
    pub fn create(&self, records: &[DailyActivityRecord]) -> SimulationResult<LabelTable> {
        if records.len() < 2 {
            return Err(SimulationError::insufficient_data(format!(
                "daily labeling needs at least 2 rows, got {}",
                records.len()
            )));
        }

        // Phase 1: score every row, then reduce to the two thresholds.
        // This is the pipeline's synchronization barrier: nothing below may
        // run until every row has been scored.
        let scores = compute_scores(records, &self.weights);
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let thresholds = LabelThresholds {
            soft: percentile(&sorted, self.soft_percentile),
            strict: percentile(&sorted, self.strict_percentile),
        };
        info!(
            "Computed label thresholds over {} rows: soft {:.4}, strict {:.4}",
            records.len(),
            thresholds.soft,
            thresholds.strict
        );

        let mut labels: Vec<DailyLabel> = records
            .iter()
            .map(|record| DailyLabel {
                employee_id: record.employee_id,
                date: record.date,
                day_suspicious: false,
                detection_tier: DetectionTier::None,
                is_false_positive: false,
            })
            .collect();

        let mut statistics = LabelingStatistics {
            total_rows: records.len(),
            ..LabelingStatistics::default()
        };

        // Phase 2: strict labeling (malicious employees only)
        let mut strict_indices = Vec::new();
        for (index, record) in records.iter().enumerate() {
            if record.is_malicious && scores[index] >= thresholds.strict {
                labels[index].day_suspicious = true;
                labels[index].detection_tier = DetectionTier::Strict;
                strict_indices.push(index);
            }
        }
        statistics.strict_days = strict_indices.len();

        // Phase 3: temporal expansion to adjacent days at the soft threshold.
        // Expansion looks one day out from strict days only; soft days never
        // seed further expansion.
        let row_index: HashMap<(EmployeeId, NaiveDate), usize> = records
            .iter()
            .enumerate()
            .map(|(index, record)| ((record.employee_id, record.date), index))
            .collect();

        for &strict_index in &strict_indices {
            let record = &records[strict_index];
            for offset in [-1i64, 1] {
                let adjacent_date = record.date + Duration::days(offset);
                let Some(&adjacent_index) = row_index.get(&(record.employee_id, adjacent_date))
                else {
                    continue;
                };
                if labels[adjacent_index].detection_tier == DetectionTier::None
                    && scores[adjacent_index] >= thresholds.soft
                {
                    labels[adjacent_index].day_suspicious = true;
                    labels[adjacent_index].detection_tier = DetectionTier::Soft;
                    statistics.expanded_days += 1;
                }
            }
        }

        // Phase 4: seeded false-positive injection among non-malicious
        // employees, one random day each, regardless of score
        self.inject_false_positives(records, &mut labels, &mut statistics);

        info!(
            "Labeling complete: {} strict days, {} expanded days, {} false positives across {} employees",
            statistics.strict_days,
            statistics.expanded_days,
            statistics.false_positive_days,
            statistics.false_positive_employees
        );

        Ok(LabelTable { labels, thresholds, statistics })
    }

    fn inject_false_positives(
        &self,
        records: &[DailyActivityRecord],
        labels: &mut [DailyLabel],
        statistics: &mut LabelingStatistics,
    ) {
        let non_malicious: BTreeSet<EmployeeId> = records
            .iter()
            .filter(|r| !r.is_malicious)
            .map(|r| r.employee_id)
            .collect();
        let candidates: Vec<EmployeeId> = non_malicious.into_iter().collect();

        let selected_count = self
            .false_positive_rounding
            .apply(candidates.len() as f64 * self.false_positive_rate)
            .min(candidates.len());
        if selected_count == 0 {
            debug!(
                "False-positive injection selected no employees ({} candidates at rate {})",
                candidates.len(),
                self.false_positive_rate
            );
            return;
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ LABELING_STREAM),
            None => StdRng::from_entropy(),
        };

        let selected = rand::seq::index::sample(&mut rng, candidates.len(), selected_count);
        for candidate_index in selected.into_iter() {
            let employee_id = candidates[candidate_index];
            let employee_rows: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.employee_id == employee_id)
                .map(|(index, _)| index)
                .collect();
            debug_assert!(!employee_rows.is_empty());
            let Some(&chosen) = employee_rows.choose(&mut rng) else {
                continue;
            };

            let label = &mut labels[chosen];
            label.day_suspicious = true;
            label.detection_tier = DetectionTier::Soft;
            label.is_false_positive = true;
            statistics.false_positive_days += 1;
            statistics.false_positive_employees += 1;
            debug!(
                "Injected false positive for {} on {}",
                label.employee_id, label.date
            );
        }
    }
}
