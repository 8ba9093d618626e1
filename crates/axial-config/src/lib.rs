//! Configuration for the Axial orientation tools.
//!
//! Settings persist to disk as RON, can be overridden from the command line
//! via clap, and feed the numeric tolerances and migration policy used by
//! `axial-orientation`.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, OutputFormat};
pub use config::{
    Config, LoggingConfig, MigrationConfig, ModelAxisConfig, ToleranceConfig, default_config_dir,
    load_body_records, write_ron,
};
pub use error::ConfigError;
