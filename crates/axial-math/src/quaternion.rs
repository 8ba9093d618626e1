use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::{CROSS_PRODUCT_TOLERANCE, Vector3};

/// Rotation quaternion in f64 space, stored as `w + xi + yj + zk`.
///
/// Composition follows the Hamilton convention: `a * b` applies `b` first,
/// then `a`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::from_wxyz(1.0, 0.0, 0.0, 0.0);

    pub const fn from_wxyz(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation by `angle` radians about `axis` (right-handed).
    ///
    /// The axis is normalized here. A degenerate axis yields the identity.
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let Some(axis) = axis.normalize() else {
            return Self::IDENTITY;
        };
        let (s, c) = (angle * 0.5).sin_cos();
        Self::from_wxyz(c, axis.x * s, axis.y * s, axis.z * s)
    }

    /// The unique minimal rotation taking direction `from` onto direction `to`.
    ///
    /// Both inputs are normalized first. The angle comes from
    /// `atan2(|from × to|, from · to)`, which stays accurate for nearly
    /// parallel and nearly antiparallel inputs. Only when the cross product
    /// is shorter than [`CROSS_PRODUCT_TOLERANCE`] are the inputs treated as
    /// parallel (identity) or antiparallel (π about `from × X`, or
    /// `from × Y` if that is degenerate too). Degenerate (zero-length)
    /// inputs yield the identity.
    pub fn from_rotation_arc(from: Vector3, to: Vector3) -> Self {
        let (Some(from), Some(to)) = (from.normalize(), to.normalize()) else {
            return Self::IDENTITY;
        };

        let d = from.dot(to);
        let c = from.cross(to);
        let sin_angle = c.magnitude();

        if sin_angle < CROSS_PRODUCT_TOLERANCE {
            if d > 0.0 {
                return Self::IDENTITY;
            }
            let mut axis = from.cross(Vector3::X);
            if axis.magnitude() < CROSS_PRODUCT_TOLERANCE {
                axis = from.cross(Vector3::Y);
            }
            let axis = axis.normalize_or(Vector3::Z);
            return Self::from_wxyz(0.0, axis.x, axis.y, axis.z);
        }

        let axis = c / sin_angle;
        let (s, w) = (0.5 * sin_angle.atan2(d)).sin_cos();
        Self::from_wxyz(w, axis.x * s, axis.y * s, axis.z * s)
    }

    /// Vector part (x, y, z).
    pub fn vector_part(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn norm(self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Scale to unit norm. A zero quaternion becomes the identity.
    pub fn normalize(self) -> Self {
        let n = self.norm();
        if !n.is_finite() || n <= f64::MIN_POSITIVE {
            return Self::IDENTITY;
        }
        Self::from_wxyz(self.w / n, self.x / n, self.y / n, self.z / n)
    }

    /// Inverse rotation for a unit quaternion.
    pub fn conjugate(self) -> Self {
        Self::from_wxyz(self.w, -self.x, -self.y, -self.z)
    }

    /// Rotate `v` by this (unit) quaternion.
    pub fn rotate(self, v: Vector3) -> Vector3 {
        let u = self.vector_part();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Smallest angle in `[0, π]` separating two rotations.
    ///
    /// `q` and `-q` represent the same rotation and compare as 0.
    pub fn angle_to(self, other: Self) -> f64 {
        let a = self.normalize();
        let b = other.normalize();
        let d = (a.w * b.w + a.x * b.x + a.y * b.y + a.z * b.z).abs();
        2.0 * d.min(1.0).acos()
    }

    /// `true` if both quaternions describe the same rotation within
    /// `tolerance` radians.
    pub fn approx_eq_rotation(self, other: Self, tolerance: f64) -> bool {
        self.angle_to(other) <= tolerance
    }

    pub fn is_finite(self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Lossy conversion for f32 render pipelines.
    pub fn as_quat(self) -> glam::Quat {
        glam::Quat::from_xyzw(self.x as f32, self.y as f32, self.z as f32, self.w as f32)
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_wxyz(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rotate(rhs)
    }
}

impl From<glam::DQuat> for Quaternion {
    fn from(q: glam::DQuat) -> Self {
        Self::from_wxyz(q.w, q.x, q.y, q.z)
    }
}

impl From<Quaternion> for glam::DQuat {
    fn from(q: Quaternion) -> Self {
        glam::DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[w={:.6}, x={:.6}, y={:.6}, z={:.6}]",
            self.w, self.x, self.y, self.z
        )
    }
}
