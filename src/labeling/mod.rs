//! Daily labeling
//!
//! Converts employee-level ground truth into day-level suspicion labels:
//! composite scoring, population-percentile thresholds, strict/soft
//! assignment with one-day temporal expansion, and seeded false-positive
//! injection. Operates only on the complete activity table.

pub mod daily_labels;
pub mod score;

pub use daily_labels::{
    DailyLabel, DailyLabelCreator, LabelTable, LabelThresholds, LabelingStatistics,
};
pub use score::ScoreWeights;
