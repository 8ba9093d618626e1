//! Report rendering in text, JSON, or RON.

use std::fmt::Write;

use axial_config::OutputFormat;

use crate::error::AppError;
use crate::pipeline::RunReport;

pub fn render_report(report: &RunReport, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(report)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Ron => {
            let pretty = ron::ser::PrettyConfig::new().depth_limit(4);
            let mut out = ron::ser::to_string_pretty(report, pretty)?;
            out.push('\n');
            Ok(out)
        }
    }
}

fn render_text(report: &RunReport) -> String {
    // Writing into a String cannot fail.
    let mut out = String::new();

    let failed = report.migration.failed().count();
    let _ = writeln!(
        out,
        "Migrated {} legacy records: {} succeeded, {} failed, {} warnings",
        report.migration.len(),
        report.migration.len() - failed,
        failed,
        report.migration.warning_count()
    );

    for result in report.migration.results.values() {
        let meta = &result.metadata;
        let status = if meta.success { "ok" } else { "FAILED" };
        let round_trip = meta
            .round_trip_error_degrees
            .map(|e| format!("{e:.2e}°"))
            .unwrap_or_else(|| "-".to_string());
        let inferred = if meta.rotation_sense_inferred {
            " (inferred)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {:<10} {:>7.3}° -> axis {}  {}{}  round trip {}  [{}]",
            result.body_id,
            result.legacy.obliquity_degrees,
            meta.derived_spin_axis,
            meta.derived_rotation_sense,
            inferred,
            round_trip,
            status
        );
        for warning in &meta.warnings {
            let _ = writeln!(out, "      warning: {warning}");
        }
        if let Some(validation) = report.validations.get(&result.body_id) {
            for discrepancy in &validation.discrepancies {
                let _ = writeln!(out, "      invalid: {discrepancy}");
            }
        }
    }

    if !report.evaluations.is_empty() {
        let _ = writeln!(out, "Evaluated {} spin-axis records", report.evaluations.len());
        for (id, outcome) in &report.evaluations {
            match (&outcome.state, &outcome.error) {
                (Some(state), _) => {
                    let _ = writeln!(
                        out,
                        "  {:<10} obliquity {:>7.3}°  axis {}  {}",
                        id,
                        state.obliquity_degrees(),
                        state.spin_axis,
                        state.rotation_sense
                    );
                }
                (None, Some(error)) => {
                    let _ = writeln!(out, "  {id:<10} error: {error}");
                }
                (None, None) => {}
            }
        }
    }

    let misaligned: Vec<_> = report
        .render_alignment_degrees
        .iter()
        .filter(|(_, deg)| **deg > crate::pipeline::RENDER_ALIGNMENT_TOLERANCE_DEGREES)
        .collect();
    if misaligned.is_empty() {
        let _ = writeln!(
            out,
            "Render alignment: {} meshes aligned",
            report.render_alignment_degrees.len()
        );
    } else {
        for (id, deg) in misaligned {
            let _ = writeln!(out, "Render alignment: {id} off by {deg:.4}°");
        }
    }

    out
}
