//! Dataranges - statistics reporter for game-world data files
//!
//! A CLI tool that reads the system and asset record files under a data
//! root and reports the ranges of values for their statistics: means,
//! population standard deviations, extremal records with ties, and a
//! world-class tally.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing data, malformed record, empty metric, etc.)

mod analysis;
mod cli;
mod config;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use loader::{Loader, LoaderOptions};
use models::{Report, ReportMetadata};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("Dataranges v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the report
    if let Err(e) = run_report(args) {
        error!("Report failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .dataranges.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".dataranges.toml");

    if path.exists() {
        eprintln!("⚠️  .dataranges.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .dataranges.toml")?;

    println!("✅ Created .dataranges.toml with default settings.");
    println!("   Edit it to customize loader directories and class labels.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete load-aggregate-render workflow.
fn run_report(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Load the record collections
    info!("Loading records from: {}", args.data.display());
    let loader_options = LoaderOptions {
        systems_dir: config.loader.systems_dir.clone(),
        assets_dir: config.loader.assets_dir.clone(),
        extension: config.loader.extension.clone(),
    };
    let loader = Loader::new(args.data.clone(), loader_options);
    let universe = loader.load()?;

    // Step 2: Aggregate statistics, one pass per collection
    info!("Aggregating statistics...");
    let systems = analysis::analyze_systems(&universe)?;
    let assets = analysis::analyze_assets(&universe)?;

    // Step 3: Build the report
    let duration = start_time.elapsed().as_secs_f64();
    let metadata = ReportMetadata {
        data_root: args.data.display().to_string(),
        generated_at: Utc::now(),
        systems_loaded: universe.systems.len(),
        assets_loaded: universe.assets.len(),
        virtual_assets: universe.assets.len() - universe.surveyed_assets(),
        duration_seconds: duration,
    };
    let report = Report {
        metadata,
        systems,
        assets,
    };

    // Step 4: Render and emit
    let output = match args.format {
        OutputFormat::Text => report::generate_text_report(&report, &config.labels),
        OutputFormat::Json => report::generate_json_report(&report)?,
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to: {}", path.display());
            println!("✅ Report saved to: {}", path.display());
        }
        None => {
            print!("{}", output);
        }
    }

    debug!("Completed in {:.3}s", duration);
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .dataranges.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
