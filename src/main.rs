//! Command line entry point for Coffee Pairs
//!
//! Loads the member roster and past matches, forms new pairs, then saves
//! them as the next history version and rewrites the current matches file.

use anyhow::Result;
use clap::Parser;
use coffee_pairs::config::AppConfig;
use coffee_pairs::matching::run_rng;
use coffee_pairs::service::CoffeePairsApp;
use std::path::PathBuf;
use tracing::{error, info, info_span};

/// Coffee Pairs - randomized coffee chat matching
#[derive(Parser)]
#[command(
    name = "coffee-pairs",
    version,
    about = "Pair roster members for coffee chats without repeats",
    long_about = "Coffee Pairs reads a member roster (CSV export of the member sheet) and all \
                 past_matches_<n>.csv history files, pairs people greedily in a random order \
                 while avoiding past pairs, same-department pairs and executive-executive pairs, \
                 then writes the next history version and current_matches.txt."
)]
struct Args {
    /// Member roster CSV
    #[arg(value_name = "ROSTER")]
    roster: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// History directory override
    #[arg(long, value_name = "DIR", help = "Directory holding history files")]
    history_dir: Option<PathBuf>,

    /// Report path override
    #[arg(long, value_name = "FILE", help = "Path of the current matches report")]
    report: Option<PathBuf>,

    /// Shuffle seed
    #[arg(long, value_name = "N", help = "Seed the shuffle for a reproducible run")]
    seed: Option<u64>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode
    #[arg(long, help = "Compute and print pairs without writing any files")]
    dry_run: bool,

    /// JSON output
    #[arg(long, help = "Print the result as JSON instead of the text listing")]
    json: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(roster) = &args.roster {
        config.files.roster_path = Some(roster.clone());
    }

    if let Some(dir) = &args.history_dir {
        config.files.history_dir = dir.clone();
    }

    if let Some(report) = &args.report {
        config.files.report_path = report.clone();
    }

    if let Some(seed) = args.seed {
        config.matching.seed = Some(seed);
    }

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    coffee_pairs::config::validate_config(&config)?;
    Ok(config)
}

fn run(args: &Args, config: AppConfig) -> Result<()> {
    let mut rng = run_rng(config.matching.seed);
    let app = CoffeePairsApp::from_config(config)?;

    let plan = app.plan(&mut rng)?;
    let report = plan.report();

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.render_console());
    }

    if args.dry_run {
        info!("Dry run completed - no files written");
        return Ok(());
    }

    let outcome = app.persist(&plan)?;
    info!(
        "Run complete: version {} saved to {}, report saved to {}",
        outcome.version, outcome.history_location, outcome.report_location
    );

    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let span = info_span!("coffee_pairs", service = %config.service.name);
    let _guard = span.enter();

    info!(
        "Starting {} v{}",
        config.service.name,
        coffee_pairs::VERSION
    );
    if let Some(path) = &config.files.roster_path {
        info!("Using member file: {}", path.display());
    }

    if let Err(e) = run(&args, config) {
        error!("FATAL ERROR: {:#}", e);
        std::process::exit(1);
    }
}
