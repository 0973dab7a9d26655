//! Printing activity generation
//!
//! Simulates one employee-day of printing: command count, page volume with a
//! right-skewed tail (bulk printing for malicious actors), color/monochrome
//! split, off-hours fraction, and cross-campus printing.

use crate::activity::records::PrintActivity;
use crate::activity::sampling;
use crate::employee::EmployeeProfile;
use crate::patterns::PatternTable;
use crate::simulation::SimulationResult;
use rand::rngs::StdRng;
use rand::Rng;

/// Gamma shape controlling the skew of the page distribution
const PAGES_GAMMA_SHAPE: f64 = 1.2;

/// Off-hours tendency ceiling after the malicious boost
const OFF_HOURS_TENDENCY_CAP: f64 = 0.4;

/// Cross-campus printing probability for malicious employees
const MALICIOUS_CROSS_CAMPUS_PROBABILITY: f64 = 0.25;

/// Base cross-campus printing probability
const CROSS_CAMPUS_PROBABILITY: f64 = 0.05;

/// Generates daily printing activity
#[derive(Debug, Clone)]
pub struct PrintActivityGenerator {
    patterns: PatternTable,
}

impl PrintActivityGenerator {
    /// Create a generator over the given pattern table
    pub fn new(patterns: PatternTable) -> Self {
        Self { patterns }
    }

    /// Generate one day of printing activity.
    ///
    /// Abroad days and days failing the group's print-likelihood draw yield
    /// the all-zero record.
    pub fn generate(
        &self,
        profile: &EmployeeProfile,
        is_abroad: bool,
        rng: &mut StdRng,
    ) -> SimulationResult<PrintActivity> {
        if is_abroad {
            return Ok(PrintActivity::empty());
        }

        let pattern = self.patterns.get(profile.behavioral_group)?;
        if rng.gen::<f64>() > pattern.print.likelihood {
            return Ok(PrintActivity::empty());
        }

        let mut num_print_commands = sampling::poisson(rng, pattern.print.commands_mean).max(1);

        let pages_base = if profile.is_malicious {
            pattern.print.pages_mean * self.patterns.malicious.print_pages_multiplier
        } else {
            pattern.print.pages_mean
        };
        let multiplier = if profile.is_malicious {
            rng.gen_range(0.8..1.2)
        } else {
            rng.gen_range(0.7..1.3)
        };
        let raw_pages =
            sampling::gamma(rng, PAGES_GAMMA_SHAPE, pages_base / PAGES_GAMMA_SHAPE) * multiplier;
        let total_printed_pages = (raw_pages as u32).max(1);

        // Bulk jobs come with extra commands
        if f64::from(total_printed_pages) > pages_base * 2.0 {
            num_print_commands += sampling::poisson(rng, 1.0);
        }

        let sampled_ratio =
            sampling::clamp_ratio(sampling::normal(rng, pattern.print.color_ratio, 0.1));
        let num_color_prints =
            ((f64::from(total_printed_pages) * sampled_ratio).round() as u32)
                .min(total_printed_pages);
        let num_bw_prints = total_printed_pages - num_color_prints;
        let ratio_color_prints = f64::from(num_color_prints) / f64::from(total_printed_pages);

        let (num_print_commands_off_hours, num_printed_pages_off_hours) = self.sample_off_hours(
            profile,
            pattern.off_hours_tendency,
            num_print_commands,
            total_printed_pages,
            rng,
        );

        let (print_campuses, printed_from_other_campus) = self.sample_campuses(profile, rng);

        Ok(PrintActivity {
            num_print_commands,
            total_printed_pages,
            num_print_commands_off_hours,
            num_printed_pages_off_hours,
            num_color_prints,
            num_bw_prints,
            ratio_color_prints,
            printed_from_other_campus,
            print_campuses,
        })
    }

    /// Sample the off-hours share of the day's printing
    fn sample_off_hours(
        &self,
        profile: &EmployeeProfile,
        base_tendency: f64,
        num_commands: u32,
        total_pages: u32,
        rng: &mut StdRng,
    ) -> (u32, u32) {
        let tendency = if profile.is_malicious {
            (base_tendency * self.patterns.malicious.off_hours_multiplier)
                .min(OFF_HOURS_TENDENCY_CAP)
        } else {
            base_tendency
        };

        if rng.gen::<f64>() >= tendency {
            return (0, 0);
        }

        let fraction = if profile.is_malicious {
            rng.gen_range(0.3..0.7)
        } else {
            rng.gen_range(0.1..0.4)
        };
        let off_commands = ((f64::from(num_commands) * fraction) as u32).min(num_commands);
        let off_pages = ((f64::from(total_pages) * fraction) as u32).min(total_pages);
        (off_commands, off_pages)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BehavioralGroup, EmployeeId};
    use rand::SeedableRng;

    fn profile(group: BehavioralGroup, malicious: bool) -> EmployeeProfile {
        EmployeeProfile {
            employee_id: EmployeeId::from_index(2),
            department: "Marketing and Business Development".to_string(),
            campus: "Campus A".to_string(),
            position: "Marketing Coordinator".to_string(),
            seniority_years: 2,
            classification_level: 1,
            behavioral_group: group,
            origin_country: "Israel".to_string(),
            is_malicious: malicious,
        }
    }

    #[test]
    fn test_abroad_day_is_all_zero() {
        let generator = PrintActivityGenerator::new(PatternTable::builtin());
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let record =
                generator.generate(&profile(BehavioralGroup::D, true), true, &mut rng).unwrap();
            assert_eq!(record, PrintActivity::empty());
        }
    }

    #[test]
    fn test_color_split_always_sums() {
        let generator = PrintActivityGenerator::new(PatternTable::builtin());
        let mut rng = StdRng::seed_from_u64(2);
        for i in 0..1000 {
            let record = generator
                .generate(&profile(BehavioralGroup::D, i % 3 == 0), false, &mut rng)
                .unwrap();
            assert_eq!(
                record.num_color_prints + record.num_bw_prints,
                record.total_printed_pages
            );
            assert!((0.0..=1.0).contains(&record.ratio_color_prints));
            if record.total_printed_pages > 0 {
                let expected =
                    f64::from(record.num_color_prints) / f64::from(record.total_printed_pages);
                assert!((record.ratio_color_prints - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_off_hours_never_exceed_totals() {
        let generator = PrintActivityGenerator::new(PatternTable::builtin());
        let mut rng = StdRng::seed_from_u64(3);
        for i in 0..1000 {
            let record = generator
                .generate(&profile(BehavioralGroup::B, i % 2 == 0), false, &mut rng)
                .unwrap();
            assert!(record.num_print_commands_off_hours <= record.num_print_commands);
            assert!(record.num_printed_pages_off_hours <= record.total_printed_pages);
        }
    }

    #[test]
    fn test_active_day_has_at_least_one_command_and_page() {
        let generator = PrintActivityGenerator::new(PatternTable::builtin());
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..500 {
            let record =
                generator.generate(&profile(BehavioralGroup::D, false), false, &mut rng).unwrap();
            if record.num_print_commands > 0 {
                assert!(record.total_printed_pages >= 1);
            } else {
                assert_eq!(record, PrintActivity::empty());
            }
        }
    }

    #[test]
    fn test_malicious_bulk_printing_tail() {
        let generator = PrintActivityGenerator::new(PatternTable::builtin());
        let mut rng = StdRng::seed_from_u64(5);
        let total_pages = |malicious: bool, rng: &mut StdRng| -> u64 {
            (0..600)
                .map(|_| {
                    generator
                        .generate(&profile(BehavioralGroup::D, malicious), false, rng)
                        .unwrap()
                        .total_printed_pages as u64
                })
                .sum()
        };
        let malicious_pages = total_pages(true, &mut rng);
        let regular_pages = total_pages(false, &mut rng);
        assert!(
            malicious_pages > regular_pages * 2,
            "expected bulk-printing tail: malicious {} vs regular {}",
            malicious_pages,
            regular_pages
        );
    }
}
