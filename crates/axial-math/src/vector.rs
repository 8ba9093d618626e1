use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Immutable 3D vector in f64 space.
///
/// Used both as a free vector and as a direction. When used as a direction
/// its magnitude is expected to be 1 within [`crate::UNIT_VECTOR_TOLERANCE`];
/// the type itself does not enforce that.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector in the X direction (1, 0, 0).
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector in the Y direction (0, 1, 0).
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector in the Z direction (0, 0, 1).
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a new vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns x² + y² + z².
    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns the unit vector pointing the same way, or `None` when the
    /// magnitude is zero, subnormal or not finite.
    pub fn normalize(self) -> Option<Self> {
        let len = self.magnitude();
        if len.is_finite() && len > f64::MIN_POSITIVE {
            Some(self / len)
        } else {
            None
        }
    }

    /// Like [`Vector3::normalize`] but substitutes `fallback` for a
    /// degenerate input.
    pub fn normalize_or(self, fallback: Self) -> Self {
        self.normalize().unwrap_or(fallback)
    }

    /// Returns the dot product: x₁x₂ + y₁y₂ + z₁z₂
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Returns the cross product self × rhs.
    ///
    ///   result.x = self.y * rhs.z - self.z * rhs.y
    ///   result.y = self.z * rhs.x - self.x * rhs.z
    ///   result.z = self.x * rhs.y - self.y * rhs.x
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Multiply every component by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Angle in radians between two vectors, in `[0, π]`.
    ///
    /// Returns 0 if either input is degenerate.
    pub fn angle_between(self, rhs: Self) -> f64 {
        match (self.normalize(), rhs.normalize()) {
            (Some(a), Some(b)) => a.dot(b).clamp(-1.0, 1.0).acos(),
            _ => 0.0,
        }
    }

    /// Component-wise comparison within an absolute tolerance.
    pub fn approx_eq(self, rhs: Self, tolerance: f64) -> bool {
        (self.x - rhs.x).abs() <= tolerance
            && (self.y - rhs.y).abs() <= tolerance
            && (self.z - rhs.z).abs() <= tolerance
    }

    /// `true` when no component is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Lossy conversion for f32 render pipelines.
    pub fn as_vec3(self) -> glam::Vec3 {
        glam::Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<glam::DVec3> for Vector3 {
    fn from(v: glam::DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for glam::DVec3 {
    fn from(v: Vector3) -> Self {
        glam::DVec3::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        let v = Vector3::new(3.0, 4.0, 12.0);
        assert_eq!(v.magnitude(), 13.0);
        assert_eq!(v.magnitude_squared(), 169.0);
    }

    #[test]
    fn test_normalize_produces_unit_length() {
        let v = Vector3::new(1.0, -2.0, 2.0).normalize().unwrap();
        assert!((v.magnitude() - 1.0).abs() < 1e-15);
        assert!(v.approx_eq(Vector3::new(1.0 / 3.0, -2.0 / 3.0, 2.0 / 3.0), 1e-15));
    }

    #[test]
    fn test_normalize_zero_is_none() {
        assert!(Vector3::ZERO.normalize().is_none());
        assert!(Vector3::new(f64::NAN, 0.0, 1.0).normalize().is_none());
        assert_eq!(Vector3::ZERO.normalize_or(Vector3::Z), Vector3::Z);
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(Vector3::Z), Vector3::X);
        assert_eq!(Vector3::Z.cross(Vector3::X), Vector3::Y);
        assert_eq!(Vector3::Y.cross(Vector3::X), -Vector3::Z);
    }

    #[test]
    fn test_cross_is_perpendicular() {
        let a = Vector3::new(0.3, -1.2, 2.5);
        let b = Vector3::new(-0.7, 0.4, 1.1);
        let c = a.cross(b);
        assert!(c.dot(a).abs() < 1e-12);
        assert!(c.dot(b).abs() < 1e-12);
    }

    #[test]
    fn test_dot() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -5.0, 6.0);
        assert_eq!(a.dot(b), 12.0);
    }

    #[test]
    fn test_angle_between() {
        let angle = Vector3::X.angle_between(Vector3::new(1.0, 1.0, 0.0));
        assert!((angle - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert!((Vector3::Z.angle_between(-Vector3::Z) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(Vector3::ZERO.angle_between(Vector3::X), 0.0);
    }

    #[test]
    fn test_operators() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vector3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Vector3::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Vector3::new(0.5, 1.0, 1.5));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_glam_interop() {
        let v = Vector3::new(0.1, 0.2, 0.3);
        let d: glam::DVec3 = v.into();
        assert_eq!(Vector3::from(d), v);
        let f = v.as_vec3();
        assert!((f.y - 0.2).abs() < 1e-7);
    }

    #[test]
    fn test_deserializes_from_ron_tuple_struct_syntax() {
        let v: Vector3 = ron::from_str("(x: 0.0, y: 1.0, z: 0.0)").unwrap();
        assert_eq!(v, Vector3::Y);
    }
}
