// Insider Threat Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/insider-threat-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/insider-threat-simulator --employee-count 500 --days 365 --seed 7 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use insider_threat_simulator::employee::EmployeeGenerator;
use insider_threat_simulator::export::DatasetExporter;
use insider_threat_simulator::labeling::DailyLabelCreator;
use insider_threat_simulator::noise::NoiseInjector;
use insider_threat_simulator::simulation::{LoggingConfig, SimulationOrchestrator};
use insider_threat_simulator::types::config::CliArgs;
use insider_threat_simulator::types::SimulationConfig;
use std::process;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let default_config = SimulationConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };
    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Insider Threat Simulator");

    // Load configuration from CLI arguments and optional config file
    let dry_run = args.dry_run;
    let config = match SimulationConfig::from_cli_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    if let Err(e) = run_pipeline(&config) {
        error!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("Insider Threat Simulator completed successfully");
}

/// Run the full generation pipeline: employees, activity table, labels,
/// optional noise, export.
fn run_pipeline(config: &SimulationConfig) -> anyhow::Result<()> {
    print_configuration_summary(config);

    eprintln!("Generating employee profiles...");
    let employees = EmployeeGenerator::new(config.seed)
        .generate(config)
        .context("employee generation failed")?;
    let malicious_count = employees.values().filter(|e| e.is_malicious).count();
    eprintln!(
        "  {} employees generated ({} malicious)",
        employees.len(),
        malicious_count
    );

    eprintln!("Generating activity table...");
    let mut orchestrator = SimulationOrchestrator::new(config.clone(), employees.clone())
        .context("orchestrator initialization failed")?;
    let mut records = orchestrator.run().context("activity generation failed")?;
    eprintln!("  {}", orchestrator.statistics().summary());

    eprintln!("Creating daily labels...");
    let labels = DailyLabelCreator::new(config)
        .create(&records)
        .context("daily labeling failed")?;
    eprintln!(
        "  thresholds: soft {:.4} / strict {:.4}; {} strict days, {} expanded, {} false positives",
        labels.thresholds.soft,
        labels.thresholds.strict,
        labels.statistics.strict_days,
        labels.statistics.expanded_days,
        labels.statistics.false_positive_days
    );

    if config.add_noise {
        eprintln!("Injecting noise...");
        let stats = NoiseInjector::new(config.noise.clone(), config.seed).apply(&mut records);
        eprintln!(
            "  modified {} of {} rows (burn {}, print {}, entry-time {})",
            stats.modified_rows,
            stats.total_rows,
            stats.burn_modifications,
            stats.print_modifications,
            stats.entry_time_modifications
        );
    }

    eprintln!("Exporting dataset...");
    let files = DatasetExporter::new()
        .export(
            &config.output_dir,
            &config.output_prefix,
            &records,
            &labels,
            &employees,
        )
        .context("export failed")?;
    eprintln!("Export completed:");
    eprintln!("  dataset:  {}", files.dataset.display());
    eprintln!("  labels:   {}", files.labels.display());
    eprintln!("  profiles: {}", files.profiles.display());

    Ok(())
}

/// Print a short configuration summary to stderr
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  employees:        {}", config.employee_count);
    eprintln!(
        "  days:             {} (from {} to {})",
        config.days,
        config.start_date,
        config.end_date()
    );
    eprintln!("  malicious ratio:  {:.1}%", config.malicious_ratio * 100.0);
    eprintln!(
        "  seed:             {}",
        config
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "entropy".to_string())
    );
    eprintln!(
        "  labeling:         strict P{:.0} / soft P{:.0}, {:.1}% false positives ({})",
        config.strict_percentile * 100.0,
        config.soft_percentile * 100.0,
        config.false_positive_rate * 100.0,
        config.false_positive_rounding
    );
    eprintln!("  noise:            {}", if config.add_noise { "enabled" } else { "disabled" });
    eprintln!("  output:           {}/{}_*.jsonl", config.output_dir, config.output_prefix);
}
