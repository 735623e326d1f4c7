//! Environment Config Check - Main CLI Application
//!
//! Verifies that per-environment property files declare the same keys in the
//! same order with the same line layout, failing the build when they drift.

use clap::Parser;
use env_config_check::{
    checker::ConsistencyChecker,
    cli::Cli,
    config::{display_config_summary, load_config, EnvManager},
    error::Result,
    output::OutputCoordinator,
    PKG_NAME, VERSION,
};
use std::process;

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(2);
    }

    if cli.should_show_topic_help() {
        println!("{}", cli.display_help());
        return;
    }

    let use_color = cli.use_colors();
    let verbose = cli.verbose || cli.debug;

    if let Err(e) = run_application(cli) {
        eprintln!("{}", e.format_for_console(use_color));

        if verbose {
            eprintln!();
            eprintln!("{}", e.user_friendly_message());
        }

        process::exit(e.exit_code());
    }
}

/// Main application logic
fn run_application(cli: Cli) -> Result<()> {
    if let Some(ref path) = cli.init_env {
        EnvManager::save_example_env_file(path)?;
        println!("Wrote example configuration to {}", path.display());
        return Ok(());
    }

    if cli.debug {
        eprintln!("{} v{}", PKG_NAME, VERSION);
        eprintln!(
            "Built {} from {}",
            option_env!("BUILD_TIME").unwrap_or("unknown time"),
            option_env!("GIT_COMMIT").unwrap_or("unknown commit")
        );
        eprintln!();
    }

    let format = cli.format;
    let config = load_config(cli)?;

    if config.debug {
        eprintln!("Configuration loaded successfully:");
        for line in display_config_summary(&config).lines() {
            eprintln!("  {}", line);
        }
        for warning in EnvManager::validate_current_env() {
            eprintln!("  {}", warning);
        }
        eprintln!();
    }

    let checker = ConsistencyChecker::new(config);
    let settings = checker.config();
    let coordinator = OutputCoordinator::for_settings(settings.enable_color, settings.verbose, format);

    // Under the lenient policy an unexpected error is logged and yields no report
    if let Some(report) = checker.execute()? {
        println!("{}", coordinator.display_report(&report)?);
    }

    Ok(())
}
