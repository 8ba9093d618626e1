//! The `axial` command: load body records, migrate legacy obliquities to
//! spin-axis configs, evaluate modern records, and report.

mod error;
mod pipeline;
mod report;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use axial_config::{CliArgs, Config};
use axial_orientation::{BodyRecord, solar_system_records};

pub use error::AppError;
pub use pipeline::{
    EvaluationOutcome, InputSplit, RENDER_ALIGNMENT_TOLERANCE_DEGREES, RunReport, process_records,
    split_records,
};
pub use report::render_report;

/// Where body records come from.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordSource {
    Builtin,
    File(PathBuf),
}

impl RecordSource {
    /// `--builtin` wins, then `--bodies`/`migration.bodies_file`.
    pub fn resolve(args: &CliArgs, config: &Config) -> Result<Self, AppError> {
        if args.builtin {
            return Ok(Self::Builtin);
        }
        config
            .migration
            .bodies_file
            .clone()
            .map(Self::File)
            .ok_or(AppError::NoInput)
    }

    pub fn load(&self) -> Result<BTreeMap<String, BodyRecord>, AppError> {
        match self {
            Self::Builtin => Ok(solar_system_records()),
            Self::File(path) => Ok(axial_config::load_body_records(path)?),
        }
    }
}

/// Run one invocation, writing the report to `out`.
///
/// Returns `Ok(true)` when every body migrated, validated, and evaluated
/// cleanly.
pub fn run(args: &CliArgs, config: &Config, out: &mut impl Write) -> Result<bool, AppError> {
    let source = RecordSource::resolve(args, config)?;
    let records = source.load()?;
    tracing::info!(bodies = records.len(), source = ?source, "loaded body records");

    let report = process_records(&records, config);

    if let Some(path) = &args.output {
        let modern = report.migration.modern_configs();
        axial_config::write_ron(path, &modern)?;
        tracing::info!(
            path = %path.display(),
            configs = modern.len(),
            "wrote migrated spin-axis configs"
        );
    }

    let rendered = render_report(&report, args.format)?;
    out.write_all(rendered.as_bytes())?;
    out.flush()?;

    Ok(report.is_clean())
}
