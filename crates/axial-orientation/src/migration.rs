//! Conversion of legacy obliquity-in-degrees records to vector configuration.
//!
//! Migration never fails outright. Every body yields a [`MigrationResult`];
//! problems surface as `success: false` plus warnings, with the spin axis
//! defaulted to the ecliptic normal so a batch never aborts on one record.
//!
//! Rotation sense is inferred when absent using "obliquity above 90° means
//! retrograde". That is a lossy legacy convention, not physics, so the
//! inference is recorded in the metadata and a retrograde guess is flagged
//! as a warning.

use std::collections::BTreeMap;

use axial_math::{UNIT_VECTOR_TOLERANCE, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{OrientationError, Result};
use crate::frame::{ECLIPTIC_NORMAL, FrameTransformer};
use crate::orbital::OrbitalCalculator;
use crate::spin_axis::SpinAxisCalculator;
use crate::types::{
    LegacyObliquityConfig, ModernOrientationConfig, OrbitalElements, RotationSense,
};

/// Tunables for [`LegacyMigrator`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MigrationOptions {
    /// Maximum accepted difference between the legacy obliquity and the one
    /// recomputed from the derived spin axis, in degrees.
    pub round_trip_tolerance_degrees: f64,
    /// Legacy obliquity above which an absent rotation sense is taken as
    /// retrograde.
    pub retrograde_threshold_degrees: f64,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            round_trip_tolerance_degrees: 0.1,
            retrograde_threshold_degrees: 90.0,
        }
    }
}

/// Why a body could not be migrated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationFailure {
    MissingOrbitalElements,
    MissingOrientation,
    InvalidInclination,
    InvalidAscendingNode,
    InvalidObliquity,
    DegenerateVector,
}

impl From<&OrientationError> for MigrationFailure {
    fn from(err: &OrientationError) -> Self {
        match err {
            OrientationError::InvalidInclination { .. } => Self::InvalidInclination,
            OrientationError::InvalidAscendingNode { .. } => Self::InvalidAscendingNode,
            OrientationError::InvalidObliquity { .. } => Self::InvalidObliquity,
            OrientationError::MissingOrientation { .. } => Self::MissingOrientation,
            OrientationError::MissingOrbitalElements { .. } => Self::MissingOrbitalElements,
            OrientationError::DegenerateVector { .. } => Self::DegenerateVector,
        }
    }
}

/// What happened while migrating one body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MigrationMetadata {
    pub success: bool,
    pub warnings: Vec<String>,
    /// Spin axis written into the modern config (ICRF frame).
    pub derived_spin_axis: Vector3,
    pub derived_rotation_sense: RotationSense,
    /// `true` when the legacy record had no rotation sense.
    pub rotation_sense_inferred: bool,
    /// |recomputed − legacy| obliquity in degrees, when a spin axis was derived.
    pub round_trip_error_degrees: Option<f64>,
    pub failure: Option<MigrationFailure>,
}

/// Legacy input, modern output, and metadata for one body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MigrationResult {
    pub body_id: String,
    pub legacy: LegacyObliquityConfig,
    pub modern: ModernOrientationConfig,
    pub metadata: MigrationMetadata,
}

/// Per-body results of a batch migration, ordered by body id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMigrationReport {
    pub results: BTreeMap<String, MigrationResult>,
}

impl BatchMigrationReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &MigrationResult> {
        self.results.values().filter(|r| r.metadata.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &MigrationResult> {
        self.results.values().filter(|r| !r.metadata.success)
    }

    /// Total number of warnings across all bodies.
    pub fn warning_count(&self) -> usize {
        self.results.values().map(|r| r.metadata.warnings.len()).sum()
    }

    /// Modern configs of successfully migrated bodies, ready to persist.
    pub fn modern_configs(&self) -> BTreeMap<String, ModernOrientationConfig> {
        self.succeeded()
            .map(|r| (r.body_id.clone(), r.modern.clone()))
            .collect()
    }
}

/// Independent re-check of a migrated configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub body_id: String,
    pub valid: bool,
    pub expected_obliquity_degrees: f64,
    pub derived_obliquity_degrees: f64,
    pub obliquity_error_degrees: f64,
    pub expected_sense: RotationSense,
    pub actual_sense: RotationSense,
    pub discrepancies: Vec<String>,
}

/// Migrates legacy records using the configured [`MigrationOptions`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LegacyMigrator {
    pub options: MigrationOptions,
}

impl LegacyMigrator {
    pub fn new(options: MigrationOptions) -> Self {
        Self { options }
    }

    /// Migrate one body. Never panics or returns an error; see module docs.
    pub fn migrate(
        &self,
        legacy: &LegacyObliquityConfig,
        elements: &OrbitalElements,
        body_id: &str,
    ) -> MigrationResult {
        let degrees = legacy.obliquity_degrees;
        let mut warnings = Vec::new();

        if !(0.0..=180.0).contains(&degrees) {
            warnings.push(format!(
                "obliquity {degrees}° is outside [0, 180]; clamped for migration"
            ));
        }
        let clamped = if degrees.is_finite() {
            degrees.clamp(0.0, 180.0)
        } else {
            degrees
        };

        let (sense, inferred) = self.resolve_sense(legacy);
        if inferred && sense == RotationSense::Retrograde {
            warnings.push(format!(
                "rotation sense inferred as {sense} from obliquity {degrees}° > {}°; ambiguous, verify against source data",
                self.options.retrograde_threshold_degrees
            ));
        }

        let mut result = match derive_spin_axis(clamped, elements) {
            Ok((normal, spin)) => {
                let recomputed = SpinAxisCalculator::compute_obliquity_degrees(spin, normal);
                let error = (recomputed - degrees).abs();
                if error.is_nan() || error > self.options.round_trip_tolerance_degrees {
                    warnings.push(format!(
                        "round trip obliquity {recomputed:.4}° differs from legacy {degrees}° by {error:.4}°"
                    ));
                }
                MigrationResult {
                    body_id: body_id.to_string(),
                    legacy: legacy.clone(),
                    modern: modern_config(legacy, spin, sense),
                    metadata: MigrationMetadata {
                        success: true,
                        warnings: Vec::new(),
                        derived_spin_axis: spin,
                        derived_rotation_sense: sense,
                        rotation_sense_inferred: inferred,
                        round_trip_error_degrees: Some(error),
                        failure: None,
                    },
                }
            }
            Err(err) => fallback_result(body_id, legacy, sense, inferred, &err),
        };

        warnings.append(&mut result.metadata.warnings);
        for warning in &warnings {
            tracing::warn!(body_id, "{warning}");
        }
        result.metadata.warnings = warnings;
        result
    }

    /// Migrate every legacy record. A body without orbital elements fails
    /// on its own with [`MigrationFailure::MissingOrbitalElements`].
    pub fn migrate_batch(
        &self,
        legacy: &BTreeMap<String, LegacyObliquityConfig>,
        elements: &BTreeMap<String, OrbitalElements>,
    ) -> BatchMigrationReport {
        let results = legacy
            .iter()
            .map(|(id, config)| {
                let result = match elements.get(id) {
                    Some(el) => self.migrate(config, el, id),
                    None => {
                        let (sense, inferred) = self.resolve_sense(config);
                        let err = OrientationError::MissingOrbitalElements {
                            body_id: id.clone(),
                        };
                        let result = fallback_result(id, config, sense, inferred, &err);
                        tracing::warn!(body_id = %id, "{err}");
                        result
                    }
                };
                (id.clone(), result)
            })
            .collect();

        let report = BatchMigrationReport { results };
        tracing::info!(
            total = report.len(),
            failed = report.failed().count(),
            warnings = report.warning_count(),
            "legacy obliquity migration finished"
        );
        report
    }

    /// Re-derive obliquity and rotation sense from a migrated config and
    /// compare them with the legacy record.
    pub fn validate(
        &self,
        result: &MigrationResult,
        elements: &OrbitalElements,
        tolerance_degrees: f64,
    ) -> ValidationReport {
        let legacy = &result.legacy;
        let modern = &result.modern;
        let mut discrepancies = Vec::new();

        if !result.metadata.success {
            discrepancies.push("migration did not succeed".to_string());
        }

        let expected = legacy.obliquity_degrees;
        let derived = match OrbitalCalculator::compute_orbital_normal(elements) {
            Ok(normal) => {
                if !FrameTransformer::validate_unit_vector(modern.spin_axis, UNIT_VECTOR_TOLERANCE)
                {
                    discrepancies.push(format!(
                        "spin axis magnitude {} is not unit length",
                        modern.spin_axis.magnitude()
                    ));
                }
                SpinAxisCalculator::compute_obliquity_degrees(modern.spin_axis, normal)
            }
            Err(err) => {
                discrepancies.push(format!("cannot derive orbital normal: {err}"));
                f64::NAN
            }
        };

        let error = (derived - expected).abs();
        if error.is_nan() || error > tolerance_degrees {
            discrepancies.push(format!(
                "obliquity {derived:.4}° differs from legacy {expected}° by {error:.4}° (tolerance {tolerance_degrees}°)"
            ));
        }

        let (expected_sense, _) = self.resolve_sense(legacy);
        if modern.rotation_sense != expected_sense {
            discrepancies.push(format!(
                "rotation sense {} does not match expected {expected_sense}",
                modern.rotation_sense
            ));
        }

        ValidationReport {
            body_id: result.body_id.clone(),
            valid: discrepancies.is_empty(),
            expected_obliquity_degrees: expected,
            derived_obliquity_degrees: derived,
            obliquity_error_degrees: error,
            expected_sense,
            actual_sense: modern.rotation_sense,
            discrepancies,
        }
    }

    fn resolve_sense(&self, legacy: &LegacyObliquityConfig) -> (RotationSense, bool) {
        match legacy.rotation_sense {
            Some(sense) => (sense, false),
            None => (
                RotationSense::infer_from_obliquity(
                    legacy.obliquity_degrees,
                    self.options.retrograde_threshold_degrees,
                ),
                true,
            ),
        }
    }
}

/// Migrate one body with default options.
pub fn migrate_legacy_obliquity(
    legacy: &LegacyObliquityConfig,
    elements: &OrbitalElements,
    body_id: &str,
) -> MigrationResult {
    LegacyMigrator::default().migrate(legacy, elements, body_id)
}

/// Migrate a batch with default options.
pub fn migrate_legacy_obliquity_batch(
    legacy: &BTreeMap<String, LegacyObliquityConfig>,
    elements: &BTreeMap<String, OrbitalElements>,
) -> BatchMigrationReport {
    LegacyMigrator::default().migrate_batch(legacy, elements)
}

/// Validate a migration result with default options.
pub fn validate_migration(
    result: &MigrationResult,
    elements: &OrbitalElements,
    tolerance_degrees: f64,
) -> ValidationReport {
    LegacyMigrator::default().validate(result, elements, tolerance_degrees)
}

fn derive_spin_axis(obliquity_degrees: f64, elements: &OrbitalElements) -> Result<(Vector3, Vector3)> {
    let (normal, node) = OrbitalCalculator::compute_orbital_frame(elements)?;
    let spin = SpinAxisCalculator::compute_spin_axis(normal, node, obliquity_degrees.to_radians())?;
    Ok((normal, spin))
}

fn modern_config(
    legacy: &LegacyObliquityConfig,
    spin_axis: Vector3,
    sense: RotationSense,
) -> ModernOrientationConfig {
    ModernOrientationConfig {
        spin_axis,
        rotation_sense: sense,
        model_north_axis: legacy.model_north_axis,
        precession_rate: legacy.precession_rate,
    }
}

fn fallback_result(
    body_id: &str,
    legacy: &LegacyObliquityConfig,
    sense: RotationSense,
    inferred: bool,
    err: &OrientationError,
) -> MigrationResult {
    MigrationResult {
        body_id: body_id.to_string(),
        legacy: legacy.clone(),
        modern: modern_config(legacy, ECLIPTIC_NORMAL, sense),
        metadata: MigrationMetadata {
            success: false,
            warnings: vec![format!(
                "migration failed: {err}; spin axis defaulted to ecliptic normal"
            )],
            derived_spin_axis: ECLIPTIC_NORMAL,
            derived_rotation_sense: sense,
            rotation_sense_inferred: inferred,
            round_trip_error_degrees: None,
            failure: Some(MigrationFailure::from(err)),
        },
    }
}
