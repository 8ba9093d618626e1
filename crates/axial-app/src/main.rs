//! `axial`: migrate legacy obliquity records to spin-axis configs.
//!
//! Run with `cargo run -p axial-app -- --builtin` for the solar-system
//! catalogue, or `--bodies path/to/bodies.ron` for your own records.

use std::process::ExitCode;

use axial_config::{CliArgs, Config, default_config_dir};
use clap::Parser;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    axial_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let stdout = std::io::stdout();
    match axial_app::run(&args, &config, &mut stdout.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            tracing::warn!("some bodies did not migrate or validate cleanly");
            ExitCode::from(1)
        }
        Err(err) => {
            tracing::error!(error = %err, "axial failed");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
