//! Spin-axis derivation from obliquity, and the inverse.
//!
//! The spin axis is obtained by rotating the orbital normal `N` by the
//! obliquity `ε` about an axis built from the ascending-node direction `A`
//! (Rodrigues):
//!
//! ```text
//! S = N·cos ε + (K × N)·sin ε + K·(K·N)·(1 − cos ε)
//! ```
//!
//! with `K` the normalized rotation axis `A × N`.

use std::f64::consts::PI;

use axial_math::{CROSS_PRODUCT_TOLERANCE, UNIT_VECTOR_TOLERANCE, Vector3};

use crate::error::{OrientationError, Result};
use crate::frame::{ECLIPTIC_NORMAL, FrameTransformer};
use crate::orbital::ANGLE_DOMAIN_SLACK;

/// Obliquities below this return the orbital normal untouched.
const ZERO_OBLIQUITY_EPSILON: f64 = 1e-9;

/// Dot products within this of ±1 resolve to exactly 0 or π.
const PARALLEL_DOT_EPSILON: f64 = 1e-15;

/// Stateless spin-axis calculator. All vectors are in the ICRF frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpinAxisCalculator;

impl SpinAxisCalculator {
    /// Tilt `orbital_normal` by `obliquity` radians about `A × N`.
    ///
    /// Edge cases, in priority order:
    /// 1. obliquity below 1e-9 rad returns the normal unchanged;
    /// 2. when `A × N` is degenerate the rotation axis falls back to
    ///    `N × X`, then `N × Y`;
    /// 3. the result is re-normalized if it drifts off unit length.
    ///
    /// # Errors
    ///
    /// [`OrientationError::InvalidObliquity`] if `obliquity` is outside
    /// `[0, π]`.
    pub fn compute_spin_axis(
        orbital_normal: Vector3,
        ascending_node_direction: Vector3,
        obliquity: f64,
    ) -> Result<Vector3> {
        let obliquity = validate_obliquity(obliquity)?;
        if obliquity < ZERO_OBLIQUITY_EPSILON {
            return Ok(orbital_normal);
        }

        let normal = FrameTransformer::ensure_unit(
            orbital_normal,
            UNIT_VECTOR_TOLERANCE,
            ECLIPTIC_NORMAL,
        );
        let k = rotation_axis(normal, ascending_node_direction);

        let (sin_e, cos_e) = obliquity.sin_cos();
        let spin = normal * cos_e + k.cross(normal) * sin_e + k * (k.dot(normal) * (1.0 - cos_e));

        Ok(FrameTransformer::ensure_unit(spin, UNIT_VECTOR_TOLERANCE, normal))
    }

    /// Angle in radians between `spin_axis` and `orbital_normal`, in `[0, π]`.
    ///
    /// Near-parallel and near-antiparallel inputs return exactly 0 and π
    /// instead of going through `acos` at the edge of its domain.
    pub fn compute_obliquity(spin_axis: Vector3, orbital_normal: Vector3) -> f64 {
        let spin = FrameTransformer::ensure_unit(spin_axis, UNIT_VECTOR_TOLERANCE, ECLIPTIC_NORMAL);
        let normal =
            FrameTransformer::ensure_unit(orbital_normal, UNIT_VECTOR_TOLERANCE, ECLIPTIC_NORMAL);

        let d = spin.dot(normal).clamp(-1.0, 1.0);
        if d >= 1.0 - PARALLEL_DOT_EPSILON {
            0.0
        } else if d <= -1.0 + PARALLEL_DOT_EPSILON {
            PI
        } else {
            d.acos()
        }
    }

    /// Obliquity in degrees; convenience for reporting.
    pub fn compute_obliquity_degrees(spin_axis: Vector3, orbital_normal: Vector3) -> f64 {
        Self::compute_obliquity(spin_axis, orbital_normal).to_degrees()
    }
}

fn validate_obliquity(obliquity: f64) -> Result<f64> {
    if obliquity.is_nan() || !(0.0..=PI + ANGLE_DOMAIN_SLACK).contains(&obliquity) {
        return Err(OrientationError::InvalidObliquity { value: obliquity });
    }
    Ok(obliquity.min(PI))
}

/// Normalized rotation axis `A × N`, with a deterministic fallback when the
/// inputs are (anti-)parallel.
fn rotation_axis(normal: Vector3, ascending_node: Vector3) -> Vector3 {
    let k = ascending_node.cross(normal);
    if k.magnitude() >= CROSS_PRODUCT_TOLERANCE
        && let Some(k) = k.normalize()
    {
        return k;
    }

    tracing::debug!(
        normal = %normal,
        ascending_node = %ascending_node,
        "ascending node parallel to orbital normal, using fallback rotation axis"
    );
    let k = normal.cross(Vector3::X);
    if k.magnitude() >= CROSS_PRODUCT_TOLERANCE {
        return k.normalize_or(Vector3::Y);
    }
    normal.cross(Vector3::Y).normalize_or(Vector3::X)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbital::OrbitalCalculator;
    use crate::types::OrbitalElements;

    fn assert_unit(v: Vector3) {
        assert!(v.is_finite(), "non-finite vector {v}");
        assert!((v.magnitude() - 1.0).abs() < 1e-12, "magnitude {}", v.magnitude());
    }

    #[test]
    fn test_zero_obliquity_is_identity() {
        let n = Vector3::new(0.1, -0.2, 0.97).normalize().unwrap();
        let a = Vector3::new(0.9, 0.1, 0.0);
        assert_eq!(SpinAxisCalculator::compute_spin_axis(n, a, 0.0).unwrap(), n);
        assert_eq!(SpinAxisCalculator::compute_spin_axis(n, a, 5e-10).unwrap(), n);
    }

    #[test]
    fn test_earth_tilts_away_from_ecliptic_normal() {
        let obliquity = 23.44f64.to_radians();
        let spin = SpinAxisCalculator::compute_spin_axis(Vector3::Z, Vector3::X, obliquity).unwrap();
        assert_unit(spin);
        // K = X × Z = −Y, so the tilt stays in the XZ plane, toward −X.
        assert!(spin.y.abs() < 1e-12, "got {spin}");
        assert!(spin.x < 0.0, "got {spin}");
        let recovered = SpinAxisCalculator::compute_obliquity(spin, Vector3::Z);
        assert!((recovered - obliquity).abs() < 1e-12, "recovered {recovered}");
    }

    #[test]
    fn test_round_trip_over_obliquity_range() {
        let planes = [(0.0, 0.0), (0.13, 1.3), (1.5, 4.0), (2.7, 0.4), (std::f64::consts::PI, 2.0)];
        for (i, node) in planes {
            let elements = OrbitalElements::new(i, node);
            let (n, a) = OrbitalCalculator::compute_orbital_frame(&elements).unwrap();
            for step in 0..=180 {
                let obliquity = PI * f64::from(step) / 180.0;
                let spin = SpinAxisCalculator::compute_spin_axis(n, a, obliquity).unwrap();
                assert_unit(spin);
                let recovered = SpinAxisCalculator::compute_obliquity(spin, n);
                assert!(
                    (recovered - obliquity).abs() < 1e-6,
                    "i={i} node={node} obliquity={obliquity} recovered={recovered}"
                );
            }
        }
    }

    #[test]
    fn test_round_trip_for_arbitrary_node_directions() {
        let n = Vector3::new(0.2, 0.3, 0.9).normalize().unwrap();
        for a in [Vector3::X, Vector3::Y, Vector3::new(-0.4, 0.7, 0.2), -n] {
            for obliquity in [1e-6, 0.5, 1.7, 3.0, PI] {
                let spin = SpinAxisCalculator::compute_spin_axis(n, a, obliquity).unwrap();
                let recovered = SpinAxisCalculator::compute_obliquity(spin, n);
                assert!((recovered - obliquity).abs() < 1e-6, "a={a} obliquity={obliquity}");
            }
        }
    }

    #[test]
    fn test_parallel_node_and_normal_uses_fallback_axis() {
        let spin = SpinAxisCalculator::compute_spin_axis(Vector3::Z, Vector3::Z, 0.5).unwrap();
        assert_unit(spin);
        // Fallback K = Z × X = Y, rotating Z about Y tilts toward +X.
        assert!(spin.approx_eq(Vector3::new(0.5f64.sin(), 0.0, 0.5f64.cos()), 1e-12), "got {spin}");

        let spin = SpinAxisCalculator::compute_spin_axis(Vector3::Z, -Vector3::Z, 0.5).unwrap();
        assert_unit(spin);
    }

    #[test]
    fn test_second_fallback_axis_when_normal_is_x() {
        let spin = SpinAxisCalculator::compute_spin_axis(Vector3::X, Vector3::X, 1.0).unwrap();
        assert_unit(spin);
        let recovered = SpinAxisCalculator::compute_obliquity(spin, Vector3::X);
        assert!((recovered - 1.0).abs() < 1e-12);
        // Fallback K = X × Y = Z, rotating X about Z tilts toward +Y.
        assert!(spin.y > 0.0 && spin.z.abs() < 1e-12, "got {spin}");
    }

    #[test]
    fn test_zero_node_direction_uses_fallback() {
        let spin = SpinAxisCalculator::compute_spin_axis(Vector3::Z, Vector3::ZERO, 1.2).unwrap();
        assert_unit(spin);
    }

    #[test]
    fn test_non_unit_normal_is_renormalized() {
        let spin = SpinAxisCalculator::compute_spin_axis(Vector3::Z * 4.0, Vector3::X, 0.4).unwrap();
        assert_unit(spin);
    }

    #[test]
    fn test_invalid_obliquity() {
        for bad in [-0.01, PI + 0.001, f64::NAN] {
            let result = SpinAxisCalculator::compute_spin_axis(Vector3::Z, Vector3::X, bad);
            assert!(
                matches!(result, Err(OrientationError::InvalidObliquity { .. })),
                "obliquity {bad} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_obliquity_edges_are_exact() {
        assert_eq!(SpinAxisCalculator::compute_obliquity(Vector3::Z, Vector3::Z), 0.0);
        assert_eq!(SpinAxisCalculator::compute_obliquity(-Vector3::Z, Vector3::Z), PI);
        assert_eq!(
            SpinAxisCalculator::compute_obliquity(Vector3::new(1e-9, 0.0, 1.0), Vector3::Z),
            0.0
        );
    }

    #[test]
    fn test_obliquity_right_angle() {
        let e = SpinAxisCalculator::compute_obliquity(Vector3::X, Vector3::Z);
        assert!((e - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert!((SpinAxisCalculator::compute_obliquity_degrees(Vector3::X, Vector3::Z) - 90.0).abs() < 1e-12);
    }
}
