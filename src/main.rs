// Scanner Entry Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/scanner-entry-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/scanner-entry-simulator --employee-count 5000 --scanners 5,10,20 --seed 7 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use scanner_entry_simulator::simulation::{LoggingConfig, ScannerSweep};
use scanner_entry_simulator::types::config::CliArgs;
use scanner_entry_simulator::types::{OutputFormat, SimulationConfig};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
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

    let _logging_guard = match logging_result {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Scanner Entry Simulator");

    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run_simulation(config) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("Scanner Entry Simulator completed successfully");
}

/// Run the sweep and print the report to stdout
fn run_simulation(config: SimulationConfig) -> anyhow::Result<()> {
    let opens_at = config.opening_time().context("invalid window opening time")?;
    let unit = config.report_unit;
    let format = config.output_format;

    let mut sweep = ScannerSweep::new(config).context("failed to prepare scanner sweep")?;
    let report = sweep.run().context("scanner sweep failed")?;

    match format {
        OutputFormat::Text => print!("{}", report.render_text(unit, opens_at)),
        OutputFormat::Json => {
            let json = report.to_json().context("failed to serialize sweep report")?;
            println!("{}", json);
        }
    }

    if let Some(elapsed) = sweep.elapsed() {
        eprintln!(
            "Simulated {} scanner counts in {:.2} seconds",
            report.entries.len(),
            elapsed.as_secs_f64()
        );
    }

    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Scanner Entry Simulator");
    eprintln!("=======================");
    eprintln!("Discrete-event simulation of a badge scanner bank at the morning rush");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Employee Count: {}", config.employee_count);
    eprintln!("  Scan Time: {:.1}s", config.scan_time);
    eprintln!(
        "  Arrival Window: {:.1}s - {:.1}s (opens at {})",
        config.window_start, config.window_end, config.window_opens_at
    );
    eprintln!("  Scanner Counts: {:?}", config.scanner_counts);
    eprintln!("  Random Seed: {}", config.seed);
    eprintln!("  Report Unit: {}", config.report_unit);
    eprintln!("  Output Format: {}", config.output_format);

    eprintln!("\nOffered Load:");
    for &scanners in &config.scanner_counts {
        eprintln!("  {:>3} scanners: {:.2}", scanners, config.offered_load(scanners));
    }
    eprintln!();
}
