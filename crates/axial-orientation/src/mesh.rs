//! Applying spin axes to renderable objects.
//!
//! A target's orientation has exactly two transitions:
//! - **replace** ([`MeshOrientationManager::apply_spin_axis_orientation`]):
//!   sets the base orientation from a spin axis; idempotent.
//! - **compose** ([`MeshOrientationManager::apply_daily_rotation`]):
//!   pre-multiplies an incremental spin; accumulates.
//!
//! The quaternion inside [`Orientation`] is private and both mutators are
//! private to this module, so no other write path exists:
//!
//! ```compile_fail
//! use axial_orientation::{Orientable, Quaternion, RenderBody};
//!
//! let mut body = RenderBody::new("earth");
//! body.orientation_mut().rotation = Quaternion::IDENTITY;
//! ```
//!
//! Within a frame the replace must happen before any compose, since replace
//! discards previously composed spin.

use std::f64::consts::TAU;

use axial_math::{Quaternion, UNIT_VECTOR_TOLERANCE, Vector3, wrap_two_pi};

use crate::frame::FrameTransformer;
use crate::types::{ModelConfig, RotationSense};

/// Orientation of a renderable object in the render frame.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Orientation {
    rotation: Quaternion,
}

impl Orientation {
    /// The current rotation.
    pub fn quaternion(&self) -> Quaternion {
        self.rotation
    }

    /// f32 rotation for glam-based render pipelines.
    pub fn as_quat(&self) -> glam::Quat {
        self.rotation.as_quat()
    }

    /// Rotate a local-space direction into the render frame.
    pub fn apply_to(&self, v: Vector3) -> Vector3 {
        self.rotation.rotate(v)
    }

    fn replace(&mut self, rotation: Quaternion) {
        self.rotation = rotation.normalize();
    }

    fn compose(&mut self, increment: Quaternion) {
        self.rotation = (increment * self.rotation).normalize();
    }
}

/// Capability required of anything the manager can orient.
pub trait Orientable {
    fn orientation(&self) -> &Orientation;
    fn orientation_mut(&mut self) -> &mut Orientation;
}

/// Minimal renderable: a name plus an orientation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderBody {
    pub name: String,
    orientation: Orientation,
}

impl RenderBody {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orientation: Orientation::default(),
        }
    }
}

impl Orientable for RenderBody {
    fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    fn orientation_mut(&mut self) -> &mut Orientation {
        &mut self.orientation
    }
}

/// Writes spin-axis orientations and daily rotation onto [`Orientable`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshOrientationManager;

impl MeshOrientationManager {
    /// Replace the target's orientation with the minimal rotation taking
    /// `model.north_axis` onto `spin_axis`.
    ///
    /// `spin_axis` is in the ICRF frame and is converted to the render frame
    /// here. The prior orientation is discarded, so repeated calls with the
    /// same inputs always produce the same state.
    ///
    /// Degenerate or non-finite axes leave the target untouched and return
    /// `false`; render loops must not fail on a transient bad input.
    pub fn apply_spin_axis_orientation<T: Orientable + ?Sized>(
        target: &mut T,
        spin_axis: Vector3,
        model: &ModelConfig,
    ) -> bool {
        let render_axis = FrameTransformer::icrf_to_render(spin_axis);
        let (Some(to), Some(from)) = (
            unit_direction(render_axis, "spin axis"),
            unit_direction(model.north_axis, "model north axis"),
        ) else {
            return false;
        };

        target
            .orientation_mut()
            .replace(Quaternion::from_rotation_arc(from, to));
        true
    }

    /// Compose a rotation of `angle` radians about `spin_axis_render`
    /// (already in the render frame) onto the target's current orientation.
    ///
    /// Accumulates across calls: two calls with θ equal one call with 2θ.
    pub fn apply_daily_rotation<T: Orientable + ?Sized>(
        target: &mut T,
        spin_axis_render: Vector3,
        angle: f64,
    ) -> bool {
        if !angle.is_finite() {
            tracing::warn!(angle, "non-finite daily rotation angle ignored");
            return false;
        }
        let Some(axis) = unit_direction(spin_axis_render, "daily rotation axis") else {
            return false;
        };

        target
            .orientation_mut()
            .compose(Quaternion::from_axis_angle(axis, angle));
        true
    }

    /// Where the target's current orientation sends `model.north_axis`, in
    /// the render frame. Debug and test support.
    pub fn effective_spin_axis<T: Orientable + ?Sized>(target: &T, model: &ModelConfig) -> Vector3 {
        let north = model.north_axis.normalize_or(Vector3::Y);
        target.orientation().apply_to(north)
    }
}

/// Accumulated spin angle after `elapsed_days` for a body with the given
/// sidereal period, wrapped into one turn and signed by `sense`.
///
/// A non-positive or non-finite period yields 0.
pub fn rotation_angle_at(elapsed_days: f64, sidereal_period_days: f64, sense: RotationSense) -> f64 {
    if !sidereal_period_days.is_finite() || sidereal_period_days <= 0.0 || !elapsed_days.is_finite() {
        return 0.0;
    }
    sense.sign() * wrap_two_pi(TAU * elapsed_days / sidereal_period_days)
}

fn unit_direction(v: Vector3, what: &'static str) -> Option<Vector3> {
    if !v.is_finite() {
        tracing::warn!(what, vector = %v, "non-finite direction, orientation unchanged");
        return None;
    }
    if FrameTransformer::validate_unit_vector(v, UNIT_VECTOR_TOLERANCE) {
        return Some(v);
    }
    let normalized = v.normalize();
    if normalized.is_none() {
        tracing::warn!(what, "zero-length direction, orientation unchanged");
    }
    normalized
}
