//! Astronomical (ICRF/J2000 ecliptic, Z-up) ↔ render (Y-up) frame mapping.
//!
//! This is the only place in the workspace that encodes the axis convention
//! of the rendering collaborator. Everything upstream works in the
//! astronomical frame; everything downstream works in the render frame.
//!
//! | ICRF | render |
//! |------|--------|
//! | +X (vernal equinox) | +X |
//! | +Y | −Z |
//! | +Z (ecliptic north) | +Y |

use axial_math::Vector3;

/// Ecliptic north in the astronomical frame. The reference "up" for bodies
/// with zero inclination and zero obliquity.
pub const ECLIPTIC_NORMAL: Vector3 = Vector3::Z;

/// Stateless frame conversion and unit-vector diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameTransformer;

impl FrameTransformer {
    /// ICRF `(x, y, z)` → render `(x, z, −y)`.
    pub fn icrf_to_render(v: Vector3) -> Vector3 {
        Vector3::new(v.x, v.z, -v.y)
    }

    /// Render `(x, y, z)` → ICRF `(x, −z, y)`. Exact inverse of
    /// [`FrameTransformer::icrf_to_render`].
    pub fn render_to_icrf(v: Vector3) -> Vector3 {
        Vector3::new(v.x, -v.z, v.y)
    }

    /// Returns `true` if `v` has unit magnitude within `tolerance`.
    ///
    /// A deviation is logged as a warning. The vector is never modified;
    /// callers decide whether to re-normalize.
    pub fn validate_unit_vector(v: Vector3, tolerance: f64) -> bool {
        let magnitude = v.magnitude();
        let valid = (magnitude - 1.0).abs() <= tolerance;
        if !valid {
            tracing::warn!(
                vector = %v,
                magnitude,
                tolerance,
                "vector is not unit length"
            );
        }
        valid
    }

    /// Validate and, if needed, re-normalize a direction.
    ///
    /// Degenerate input falls back to `fallback`.
    pub(crate) fn ensure_unit(v: Vector3, tolerance: f64, fallback: Vector3) -> Vector3 {
        if Self::validate_unit_vector(v, tolerance) {
            v
        } else {
            v.normalize_or(fallback)
        }
    }
}
