//! Orbital-plane geometry from orbital elements.

use std::f64::consts::PI;

use axial_math::{UNIT_VECTOR_TOLERANCE, Vector3, wrap_two_pi};

use crate::error::{OrientationError, Result};
use crate::frame::{ECLIPTIC_NORMAL, FrameTransformer};
use crate::types::OrbitalElements;

/// Inclinations below this are treated as exactly zero.
const ZERO_INCLINATION_EPSILON: f64 = 1e-15;

/// Slack allowed past π for values converted from degrees.
pub(crate) const ANGLE_DOMAIN_SLACK: f64 = 1e-12;

/// Derives orbital-plane normal and ascending-node direction, ICRF frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrbitalCalculator;

impl OrbitalCalculator {
    /// Unit normal of the orbital plane:
    /// `N = (sin i · sin Ω, −sin i · cos Ω, cos i)`.
    ///
    /// Zero inclination returns [`ECLIPTIC_NORMAL`] exactly. Ω is wrapped
    /// into `[0, 2π)`; inclination outside `[0, π]` or a non-finite Ω is an
    /// error.
    pub fn compute_orbital_normal(elements: &OrbitalElements) -> Result<Vector3> {
        let inclination = validate_inclination(elements.inclination)?;
        let node = validate_node(elements.longitude_of_ascending_node)?;
        if inclination.abs() < ZERO_INCLINATION_EPSILON {
            return Ok(ECLIPTIC_NORMAL);
        }

        let (sin_i, cos_i) = inclination.sin_cos();
        let (sin_o, cos_o) = node.sin_cos();
        let normal = Vector3::new(sin_i * sin_o, -sin_i * cos_o, cos_i);

        Ok(FrameTransformer::ensure_unit(
            normal,
            UNIT_VECTOR_TOLERANCE,
            ECLIPTIC_NORMAL,
        ))
    }

    /// Direction of the ascending node in the ecliptic plane:
    /// `A = (cos Ω, sin Ω, 0)`.
    pub fn compute_ascending_node_direction(longitude_of_ascending_node: f64) -> Vector3 {
        let node = wrap_two_pi(longitude_of_ascending_node);
        if !node.is_finite() {
            tracing::warn!(node, "non-finite ascending node, using vernal equinox");
            return Vector3::X;
        }
        let (sin_o, cos_o) = node.sin_cos();
        Vector3::new(cos_o, sin_o, 0.0)
    }

    /// Both orbital-plane directions at once: `(normal, ascending node)`.
    ///
    /// Unlike [`Self::compute_ascending_node_direction`], a non-finite Ω is
    /// an error here rather than a fallback.
    pub fn compute_orbital_frame(elements: &OrbitalElements) -> Result<(Vector3, Vector3)> {
        let normal = Self::compute_orbital_normal(elements)?;
        let node = Self::compute_ascending_node_direction(elements.longitude_of_ascending_node);
        Ok((normal, node))
    }
}

fn validate_inclination(inclination: f64) -> Result<f64> {
    if inclination.is_nan() || !(0.0..=PI + ANGLE_DOMAIN_SLACK).contains(&inclination) {
        return Err(OrientationError::InvalidInclination { value: inclination });
    }
    Ok(inclination.min(PI))
}

fn validate_node(node: f64) -> Result<f64> {
    if !node.is_finite() {
        return Err(OrientationError::InvalidAscendingNode { value: node });
    }
    Ok(wrap_two_pi(node))
}
