//! Evaluation of per-body configuration into [`CelestialBodyOrientationState`].

use std::collections::BTreeMap;

use axial_math::UNIT_VECTOR_TOLERANCE;

use crate::error::{OrientationError, Result};
use crate::frame::FrameTransformer;
use crate::orbital::OrbitalCalculator;
use crate::spin_axis::SpinAxisCalculator;
use crate::types::{
    BodyRecord, CelestialBodyOrientationConfig, CelestialBodyOrientationState, J2000_EPOCH_JD,
    OrbitalElements, RotationSense,
};

/// Turns a config plus orbital elements into an orientation snapshot.
///
/// Unlike migration, evaluation is strict: a domain error prevents the body
/// from receiving an orientation at all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationEvaluator {
    /// Epoch stamped onto every produced state (Julian date).
    pub epoch_jd: f64,
    /// Legacy obliquity above which an absent rotation sense is taken as
    /// retrograde.
    pub retrograde_threshold_degrees: f64,
}

impl Default for OrientationEvaluator {
    fn default() -> Self {
        Self {
            epoch_jd: J2000_EPOCH_JD,
            retrograde_threshold_degrees: 90.0,
        }
    }
}

impl OrientationEvaluator {
    pub fn new(epoch_jd: f64) -> Self {
        Self {
            epoch_jd,
            ..Self::default()
        }
    }

    /// Evaluate one body.
    ///
    /// # Errors
    ///
    /// - [`OrientationError::MissingOrientation`] when `config` is `None`
    /// - [`OrientationError::InvalidInclination`] / [`OrientationError::InvalidObliquity`]
    ///   for out-of-domain angles
    /// - [`OrientationError::DegenerateVector`] for a zero-length spin axis
    pub fn evaluate(
        &self,
        body_id: &str,
        config: Option<&CelestialBodyOrientationConfig>,
        elements: &OrbitalElements,
    ) -> Result<CelestialBodyOrientationState> {
        let config = config.ok_or_else(|| OrientationError::MissingOrientation {
            body_id: body_id.to_string(),
        })?;
        let (orbital_normal, ascending_node) = OrbitalCalculator::compute_orbital_frame(elements)?;

        let (spin_axis, rotation_sense) = match config {
            CelestialBodyOrientationConfig::SpinAxis(modern) => {
                if !modern.spin_axis.is_finite() {
                    return Err(OrientationError::DegenerateVector { what: "spin axis" });
                }
                let spin = if FrameTransformer::validate_unit_vector(
                    modern.spin_axis,
                    UNIT_VECTOR_TOLERANCE,
                ) {
                    modern.spin_axis
                } else {
                    modern
                        .spin_axis
                        .normalize()
                        .ok_or(OrientationError::DegenerateVector { what: "spin axis" })?
                };
                (spin, modern.rotation_sense)
            }
            CelestialBodyOrientationConfig::Legacy(legacy) => {
                let obliquity = legacy.obliquity_degrees.to_radians();
                let spin =
                    SpinAxisCalculator::compute_spin_axis(orbital_normal, ascending_node, obliquity)?;
                let sense = legacy.rotation_sense.unwrap_or_else(|| {
                    let inferred = RotationSense::infer_from_obliquity(
                        legacy.obliquity_degrees,
                        self.retrograde_threshold_degrees,
                    );
                    tracing::debug!(body_id, sense = %inferred, "rotation sense inferred from obliquity");
                    inferred
                });
                (spin, sense)
            }
        };

        Ok(CelestialBodyOrientationState {
            body_id: body_id.to_string(),
            orbital_normal,
            spin_axis,
            obliquity: SpinAxisCalculator::compute_obliquity(spin_axis, orbital_normal),
            rotation_sense,
            epoch_jd: self.epoch_jd,
        })
    }

    /// Evaluate a [`BodyRecord`], reporting absent orbital elements.
    pub fn evaluate_record(
        &self,
        body_id: &str,
        record: &BodyRecord,
    ) -> Result<CelestialBodyOrientationState> {
        let elements =
            record
                .orbital_elements
                .as_ref()
                .ok_or_else(|| OrientationError::MissingOrbitalElements {
                    body_id: body_id.to_string(),
                })?;
        self.evaluate(body_id, record.orientation.as_ref(), elements)
    }
}

/// Evaluate every record independently; one failure does not affect others.
pub fn evaluate_records(
    evaluator: &OrientationEvaluator,
    records: &BTreeMap<String, BodyRecord>,
) -> BTreeMap<String, Result<CelestialBodyOrientationState>> {
    records
        .iter()
        .map(|(id, record)| {
            let state = evaluator.evaluate_record(id, record);
            if let Err(ref err) = state {
                tracing::warn!(body_id = %id, error = %err, "body has no orientation");
            }
            (id.clone(), state)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LegacyObliquityConfig, ModernOrientationConfig};
    use axial_math::Vector3;

    fn legacy(degrees: f64) -> CelestialBodyOrientationConfig {
        CelestialBodyOrientationConfig::Legacy(LegacyObliquityConfig::new(degrees))
    }

    #[test]
    fn test_earth_state() {
        let evaluator = OrientationEvaluator::default();
        let state = evaluator
            .evaluate("earth", Some(&legacy(23.44)), &OrbitalElements::ecliptic())
            .unwrap();
        assert_eq!(state.orbital_normal, Vector3::Z);
        assert!((state.obliquity_degrees() - 23.44).abs() < 0.1);
        assert_eq!(state.rotation_sense, RotationSense::Prograde);
        assert_eq!(state.epoch_jd, J2000_EPOCH_JD);
    }

    #[test]
    fn test_legacy_sense_is_inferred_past_ninety_degrees() {
        let state = OrientationEvaluator::default()
            .evaluate("venus", Some(&legacy(177.4)), &OrbitalElements::from_degrees(3.39, 76.68))
            .unwrap();
        assert_eq!(state.rotation_sense, RotationSense::Retrograde);
        assert!((state.obliquity_degrees() - 177.4).abs() < 0.1);
    }

    #[test]
    fn test_explicit_legacy_sense_wins() {
        let config = CelestialBodyOrientationConfig::Legacy(
            LegacyObliquityConfig::new(120.0).with_rotation_sense(RotationSense::Prograde),
        );
        let state = OrientationEvaluator::default()
            .evaluate("odd", Some(&config), &OrbitalElements::ecliptic())
            .unwrap();
        assert_eq!(state.rotation_sense, RotationSense::Prograde);
    }

    #[test]
    fn test_spin_axis_config_obliquity_is_recomputed() {
        let tilt = 30f64.to_radians();
        let config = CelestialBodyOrientationConfig::SpinAxis(ModernOrientationConfig::new(
            Vector3::new(0.0, -tilt.sin(), tilt.cos()) * 2.0,
            RotationSense::Retrograde,
        ));
        let state = OrientationEvaluator::default()
            .evaluate("vector body", Some(&config), &OrbitalElements::ecliptic())
            .unwrap();
        assert!((state.spin_axis.magnitude() - 1.0).abs() < 1e-12);
        assert!((state.obliquity - tilt).abs() < 1e-12);
        assert_eq!(state.rotation_sense, RotationSense::Retrograde);
    }

    #[test]
    fn test_zero_spin_axis_is_an_error() {
        let config = CelestialBodyOrientationConfig::SpinAxis(ModernOrientationConfig::new(
            Vector3::ZERO,
            RotationSense::Prograde,
        ));
        let result =
            OrientationEvaluator::default().evaluate("broken", Some(&config), &OrbitalElements::ecliptic());
        assert_eq!(
            result,
            Err(OrientationError::DegenerateVector { what: "spin axis" })
        );
    }

    #[test]
    fn test_missing_orientation_is_an_error() {
        let result =
            OrientationEvaluator::default().evaluate("ghost", None, &OrbitalElements::ecliptic());
        assert_eq!(
            result,
            Err(OrientationError::MissingOrientation {
                body_id: "ghost".to_string()
            })
        );
    }

    #[test]
    fn test_out_of_range_legacy_obliquity_is_strict() {
        let result = OrientationEvaluator::default().evaluate(
            "bad",
            Some(&legacy(200.0)),
            &OrbitalElements::ecliptic(),
        );
        assert!(matches!(result, Err(OrientationError::InvalidObliquity { .. })));
    }

    #[test]
    fn test_evaluate_records_isolates_failures() {
        let mut records = BTreeMap::new();
        records.insert(
            "earth".to_string(),
            BodyRecord {
                orientation: Some(legacy(23.44)),
                orbital_elements: Some(OrbitalElements::ecliptic()),
            },
        );
        records.insert(
            "rogue".to_string(),
            BodyRecord {
                orientation: Some(legacy(10.0)),
                orbital_elements: None,
            },
        );
        records.insert("blank".to_string(), BodyRecord::default());

        let results = evaluate_records(&OrientationEvaluator::default(), &records);
        assert!(results["earth"].is_ok());
        assert_eq!(
            results["rogue"],
            Err(OrientationError::MissingOrbitalElements {
                body_id: "rogue".to_string()
            })
        );
        assert!(results["blank"].is_err());
    }
}
