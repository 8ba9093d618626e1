//! Migration, validation, evaluation, and render-frame checks over a set of
//! body records.

use std::collections::BTreeMap;

use axial_config::Config;
use axial_orientation::{
    BatchMigrationReport, BodyRecord, CelestialBodyOrientationConfig,
    CelestialBodyOrientationState, FrameTransformer, LegacyMigrator, LegacyObliquityConfig,
    MeshOrientationManager, ModelConfig, OrbitalElements, OrientationError, RenderBody,
    ValidationReport, Vector3, evaluate_records,
};
use serde::{Deserialize, Serialize};

/// Largest accepted angle between a mesh's effective north axis and the
/// render-frame spin axis, in degrees.
pub const RENDER_ALIGNMENT_TOLERANCE_DEGREES: f64 = 1e-4;

/// Records partitioned by which pipeline handles them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSplit {
    /// Legacy obliquity records, to be migrated.
    pub legacy: BTreeMap<String, LegacyObliquityConfig>,
    /// Orbital elements of every record that has them.
    pub elements: BTreeMap<String, OrbitalElements>,
    /// Spin-axis records and records without any orientation, to be evaluated.
    pub evaluated: BTreeMap<String, BodyRecord>,
}

pub fn split_records(records: &BTreeMap<String, BodyRecord>) -> InputSplit {
    let mut split = InputSplit::default();
    for (id, record) in records {
        if let Some(elements) = record.orbital_elements {
            split.elements.insert(id.clone(), elements);
        }
        match &record.orientation {
            Some(CelestialBodyOrientationConfig::Legacy(legacy)) => {
                split.legacy.insert(id.clone(), legacy.clone());
            }
            _ => {
                split.evaluated.insert(id.clone(), record.clone());
            }
        }
    }
    split
}

/// Serializable form of one evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub state: Option<CelestialBodyOrientationState>,
    pub error: Option<String>,
}

impl From<Result<CelestialBodyOrientationState, OrientationError>> for EvaluationOutcome {
    fn from(result: Result<CelestialBodyOrientationState, OrientationError>) -> Self {
        match result {
            Ok(state) => Self {
                state: Some(state),
                error: None,
            },
            Err(err) => Self {
                state: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Everything one run produced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub migration: BatchMigrationReport,
    /// Re-checks of successful migrations.
    pub validations: BTreeMap<String, ValidationReport>,
    pub evaluations: BTreeMap<String, EvaluationOutcome>,
    /// Angle between mesh north and render-frame spin axis after orienting,
    /// per body with a spin axis.
    pub render_alignment_degrees: BTreeMap<String, f64>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.migration.failed().next().is_none()
            && self.validations.values().all(|v| v.valid)
            && self.evaluations.values().all(|e| e.error.is_none())
            && self
                .render_alignment_degrees
                .values()
                .all(|deg| *deg <= RENDER_ALIGNMENT_TOLERANCE_DEGREES)
    }

    /// Body ids covered by the report.
    pub fn body_count(&self) -> usize {
        self.migration.len() + self.evaluations.len()
    }
}

/// Run every record through the pipeline that applies to it.
pub fn process_records(records: &BTreeMap<String, BodyRecord>, config: &Config) -> RunReport {
    let split = split_records(records);
    let migrator = LegacyMigrator::new(config.migration_options());

    let migration = migrator.migrate_batch(&split.legacy, &split.elements);

    let validations: BTreeMap<String, ValidationReport> = migration
        .succeeded()
        .filter_map(|result| {
            let elements = split.elements.get(&result.body_id)?;
            let report =
                migrator.validate(result, elements, config.tolerances.validation_degrees);
            if !report.valid {
                tracing::warn!(
                    body_id = %report.body_id,
                    discrepancies = ?report.discrepancies,
                    "migrated config failed validation"
                );
            }
            Some((result.body_id.clone(), report))
        })
        .collect();

    let states = evaluate_records(&config.evaluator(), &split.evaluated);

    let mut render_alignment_degrees = BTreeMap::new();
    for result in migration.succeeded() {
        let model = model_for(result.modern.model_north_axis, config);
        render_alignment_degrees.insert(
            result.body_id.clone(),
            render_alignment(&result.body_id, result.modern.spin_axis, &model),
        );
    }
    for (id, state) in &states {
        let Ok(state) = state else { continue };
        let model = model_for(declared_north_axis(&split.evaluated[id]), config);
        render_alignment_degrees.insert(id.clone(), render_alignment(id, state.spin_axis, &model));
    }

    let evaluations = states
        .into_iter()
        .map(|(id, state)| (id, EvaluationOutcome::from(state)))
        .collect();

    RunReport {
        migration,
        validations,
        evaluations,
        render_alignment_degrees,
    }
}

/// The asset's own north axis wins over the configured default.
fn model_for(north_axis: Option<Vector3>, config: &Config) -> ModelConfig {
    north_axis
        .map(ModelConfig::new)
        .unwrap_or_else(|| config.model_config())
}

fn declared_north_axis(record: &BodyRecord) -> Option<Vector3> {
    match &record.orientation {
        Some(CelestialBodyOrientationConfig::SpinAxis(modern)) => modern.model_north_axis,
        Some(CelestialBodyOrientationConfig::Legacy(legacy)) => legacy.model_north_axis,
        None => None,
    }
}

/// Orient a fresh mesh and measure how far its north axis lands from the
/// spin axis in render space.
fn render_alignment(body_id: &str, spin_axis_icrf: Vector3, model: &ModelConfig) -> f64 {
    let mut mesh = RenderBody::new(body_id);
    if !MeshOrientationManager::apply_spin_axis_orientation(&mut mesh, spin_axis_icrf, model) {
        tracing::warn!(body_id, "mesh orientation was not applied");
    }
    let effective = MeshOrientationManager::effective_spin_axis(&mesh, model);
    let target = FrameTransformer::icrf_to_render(spin_axis_icrf);
    effective.angle_between(target).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axial_orientation::{ModernOrientationConfig, RotationSense, solar_system_records};

    fn spin_axis_record(spin_axis: Vector3) -> BodyRecord {
        BodyRecord {
            orientation: Some(CelestialBodyOrientationConfig::SpinAxis(
                ModernOrientationConfig::new(spin_axis, RotationSense::Prograde),
            )),
            orbital_elements: Some(OrbitalElements::ecliptic()),
        }
    }

    #[test]
    fn test_split_records_partitions_by_orientation() {
        let mut records = solar_system_records();
        records.insert("probe".to_string(), spin_axis_record(Vector3::Z));
        records.insert("rock".to_string(), BodyRecord::default());

        let split = split_records(&records);
        assert_eq!(split.legacy.len(), records.len() - 2);
        assert_eq!(split.evaluated.len(), 2);
        assert!(split.evaluated.contains_key("probe"));
        assert!(split.evaluated.contains_key("rock"));
        assert!(!split.elements.contains_key("rock"));
        assert!(split.elements.contains_key("earth"));
    }

    #[test]
    fn test_builtin_catalogue_is_clean() {
        let report = process_records(&solar_system_records(), &Config::default());
        assert!(report.is_clean(), "{report:#?}");
        assert_eq!(report.validations.len(), report.migration.len());
        assert_eq!(report.render_alignment_degrees.len(), report.migration.len());
        assert_eq!(report.body_count(), solar_system_records().len());
    }

    #[test]
    fn test_missing_orbital_elements_is_not_clean() {
        let mut records = solar_system_records();
        records.insert(
            "rogue".to_string(),
            BodyRecord {
                orientation: Some(CelestialBodyOrientationConfig::Legacy(
                    LegacyObliquityConfig::new(12.0),
                )),
                orbital_elements: None,
            },
        );

        let report = process_records(&records, &Config::default());
        assert!(!report.is_clean());
        assert!(!report.migration.results["rogue"].metadata.success);
        assert!(!report.validations.contains_key("rogue"));
        assert!(report.validations["earth"].valid);
    }

    #[test]
    fn test_body_without_orientation_reports_error() {
        let mut records = BTreeMap::new();
        records.insert(
            "rock".to_string(),
            BodyRecord {
                orientation: None,
                orbital_elements: Some(OrbitalElements::ecliptic()),
            },
        );

        let report = process_records(&records, &Config::default());
        let outcome = &report.evaluations["rock"];
        assert!(outcome.state.is_none());
        assert!(outcome.error.as_deref().unwrap().contains("rock"));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_spin_axis_record_evaluates_and_aligns() {
        let spin = Vector3::new(0.0, -0.3977, 0.9175).normalize_or(Vector3::Z);
        let mut records = BTreeMap::new();
        records.insert("tilted".to_string(), spin_axis_record(spin));

        let mut config = Config::default();
        config.model.north_axis = [0.0, 0.0, 1.0];
        let report = process_records(&records, &config);

        let state = report.evaluations["tilted"].state.as_ref().unwrap();
        assert!(state.spin_axis.approx_eq(spin, 1e-12));
        assert!(report.render_alignment_degrees["tilted"] <= RENDER_ALIGNMENT_TOLERANCE_DEGREES);
        assert!(report.is_clean());
    }

    #[test]
    fn test_threshold_from_config_reaches_migrator() {
        let mut config = Config::default();
        config.migration.retrograde_threshold_degrees = 150.0;
        let report = process_records(&solar_system_records(), &config);

        assert_eq!(
            report.migration.results["uranus"].modern.rotation_sense,
            RotationSense::Prograde
        );
        assert_eq!(
            report.migration.results["venus"].modern.rotation_sense,
            RotationSense::Retrograde
        );
    }
}
