//! Command-line argument parsing for the `axial` tool.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::Config;

/// Report output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Ron,
}

/// Axial command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(
    name = "axial",
    about = "Migrate legacy obliquity records to spin-axis orientation configs"
)]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RON file of body records to process.
    #[arg(long, conflicts_with = "builtin")]
    pub bodies: Option<PathBuf>,

    /// Process the built-in solar-system catalogue.
    #[arg(long)]
    pub builtin: bool,

    /// Write migrated spin-axis configs to this RON file.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Round-trip and validation tolerance in degrees.
    #[arg(long)]
    pub tolerance_degrees: Option<f64>,

    /// Obliquity above which a missing rotation sense is read as retrograde.
    #[arg(long)]
    pub retrograde_threshold: Option<f64>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
        if let Some(tolerance) = args.tolerance_degrees {
            self.tolerances.round_trip_degrees = tolerance;
            self.tolerances.validation_degrees = tolerance;
        }
        if let Some(threshold) = args.retrograde_threshold {
            self.migration.retrograde_threshold_degrees = threshold;
        }
        if let Some(ref bodies) = args.bodies {
            self.migration.bodies_file = Some(bodies.clone());
        }
    }
}
