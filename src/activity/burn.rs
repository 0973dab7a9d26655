//! Document-destruction (burn) activity generation
//!
//! Simulates one employee-day of burn requests: request count, per-request
//! classification levels, volume and file counts, off-hours fraction, and
//! cross-campus flags. Classification levels are hard-capped at the
//! employee's own clearance for non-malicious employees; malicious employees
//! may exceed their clearance through the configured breach probability —
//! the only over-clearance source in the whole system. No explicit violation
//! flag is emitted; the coupling to the `is_malicious` ground truth is
//! intentional.

use crate::activity::records::BurnActivity;
use crate::activity::sampling;
use crate::employee::EmployeeProfile;
use crate::patterns::PatternTable;
use crate::simulation::SimulationResult;
use rand::rngs::StdRng;
use rand::Rng;

/// Highest classification level in the system
const MAX_CLASSIFICATION_LEVEL: u8 = 4;

/// Off-hours tendency ceiling after the malicious boost
const OFF_HOURS_TENDENCY_CAP: f64 = 0.4;

/// Cross-campus burn probability for malicious employees
const MALICIOUS_CROSS_CAMPUS_PROBABILITY: f64 = 0.2;

/// Base cross-campus burn probability
const CROSS_CAMPUS_PROBABILITY: f64 = 0.02;

/// Generates daily burn activity
#[derive(Debug, Clone)]
pub struct BurnActivityGenerator {
    patterns: PatternTable,
    clearance_breach_probability: f64,
}

impl BurnActivityGenerator {
    /// Create a generator over the given pattern table.
    ///
    /// `clearance_breach_probability` is the chance that a malicious
    /// employee's classification cap is relaxed above their own clearance.
    pub fn new(patterns: PatternTable, clearance_breach_probability: f64) -> Self {
        Self { patterns, clearance_breach_probability: clearance_breach_probability.clamp(0.0, 1.0) }
    }

    /// Generate one day of burn activity.
    ///
    /// Abroad days and days failing the (malicious-boosted) likelihood draw
    /// yield the all-zero record.
    pub fn generate(
        &self,
        profile: &EmployeeProfile,
        is_abroad: bool,
        rng: &mut StdRng,
    ) -> SimulationResult<BurnActivity> {
        if is_abroad {
            return Ok(BurnActivity::empty());
        }

        let pattern = self.patterns.get(profile.behavioral_group)?;
        let likelihood = if profile.is_malicious {
            (pattern.burn.likelihood * self.patterns.malicious.burn_likelihood_multiplier).min(1.0)
        } else {
            pattern.burn.likelihood
        };
        if rng.gen::<f64>() > likelihood {
            return Ok(BurnActivity::empty());
        }

        let base_requests = sampling::poisson(rng, pattern.burn.requests_mean).max(1);
        let num_burn_requests = if profile.is_malicious {
            ((f64::from(base_requests) * rng.gen_range(1.5..2.5)).round() as u32).max(1)
        } else {
            base_requests
        };

        let classifications = self.sample_classifications(profile, num_burn_requests, rng);
        let max_request_classification = classifications.iter().copied().max().unwrap_or(0);
        let avg_request_classification = if classifications.is_empty() {
            0.0
        } else {
            classifications.iter().map(|&c| f64::from(c)).sum::<f64>()
                / classifications.len() as f64
        };

        let sigma = if profile.is_malicious {
            self.patterns.malicious.burn_volume_sigma
        } else {
            self.patterns.regular.burn_volume_sigma
        };
        let total_burn_volume_mb =
            sampling::lognormal(rng, pattern.burn.volume_mean_log, sigma) as u32;

        let base_files = sampling::poisson(rng, pattern.burn.files_mean).max(1);
        let total_files_burned = if profile.is_malicious {
            ((f64::from(base_files) * rng.gen_range(1.8..3.0)).round() as u32).max(1)
        } else {
            base_files
        };

        let num_burn_requests_off_hours = self.sample_off_hours(
            profile,
            pattern.off_hours_tendency,
            num_burn_requests,
            rng,
        );

        let (burn_campuses, burned_from_other_campus) = self.sample_campuses(profile, rng);

        Ok(BurnActivity {
            num_burn_requests,
            max_request_classification,
            avg_request_classification,
            num_burn_requests_off_hours,
            total_burn_volume_mb,
            total_files_burned,
            burned_from_other_campus,
            burn_campuses,
        })
    }

    /// Sample the classification level of each burn request.
    ///
    /// The cap never exceeds the employee's clearance for non-malicious
    /// employees. For malicious employees the configured breach probability
    /// relaxes the cap by 1-2 levels up to the system maximum.
    fn sample_classifications(
        &self,
        profile: &EmployeeProfile,
        num_requests: u32,
        rng: &mut StdRng,
    ) -> Vec<u8> {
        let clearance = profile.classification_level.clamp(1, MAX_CLASSIFICATION_LEVEL);
        let high_classification = self
            .patterns
            .get(profile.behavioral_group)
            .map(|p| p.burn.high_classification)
            .unwrap_or(false);

        let cap = if profile.is_malicious {
            if rng.gen::<f64>() < self.clearance_breach_probability {
                let excess = rng.gen_range(1..=2);
                (clearance + excess).min(MAX_CLASSIFICATION_LEVEL)
            } else {
                clearance
            }
        } else if high_classification {
            // High-classification groups burn at their clearance ceiling
            clearance
        } else {
            let low_biased = weighted_level(rng, &[(1, 0.6), (2, 0.3), (3, 0.1)]);
            low_biased.min(clearance)
        };

        let cap = cap.max(1);
        (0..num_requests).map(|_| rng.gen_range(1..=cap)).collect()
    }

    fn sample_off_hours(
        &self,
        profile: &EmployeeProfile,
        base_tendency: f64,
        num_requests: u32,
        rng: &mut StdRng,
    ) -> u32 {
        let tendency = if profile.is_malicious {
            (base_tendency * self.patterns.malicious.off_hours_multiplier)
                .min(OFF_HOURS_TENDENCY_CAP)
        } else {
            base_tendency
        };

        if rng.gen::<f64>() >= tendency {
            return 0;
        }

        let fraction = if profile.is_malicious {
            rng.gen_range(0.3..0.8)
        } else {
            rng.gen_range(0.1..0.4)
        };
        ((f64::from(num_requests) * fraction) as u32).min(num_requests)
    }

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

/// Pick one classification level from a small weighted table
fn weighted_level(rng: &mut StdRng, table: &[(u8, f64)]) -> u8 {
    let total: f64 = table.iter().map(|(_, w)| w).sum();
    let mut draw = rng.gen::<f64>() * total;
    for (value, weight) in table {
        if draw < *weight {
            return *value;
        }
        draw -= weight;
    }
    table.last().map(|(v, _)| *v).unwrap_or(1)
}
