//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Dataranges - statistics reporter for game-world data files
///
/// Reads the system and asset record files under a data root and reports
/// the ranges of values for their statistics: mean, standard deviation,
/// and the records holding each extreme, plus a world-class tally.
///
/// Examples:
///   dataranges
///   dataranges --data ./dat --format json --output ranges.json
///   dataranges --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Root data directory containing the record files
    ///
    /// Expects the loader's system and asset subdirectories beneath it
    /// (by default `ssys/` and `assets/`).
    #[arg(
        short,
        long,
        default_value = ".",
        value_name = "DIR",
        env = "DATARANGES_DATA"
    )]
    pub data: PathBuf,

    /// Output file path for the report
    ///
    /// If not specified, the report is printed to standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .dataranges.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .dataranges.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if !self.data.exists() {
            return Err(format!(
                "Data directory does not exist: {}",
                self.data.display()
            ));
        }
        if !self.data.is_dir() {
            return Err(format!(
                "Data path is not a directory: {}",
                self.data.display()
            ));
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
