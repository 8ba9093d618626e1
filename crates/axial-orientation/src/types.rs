//! Orientation data model: orbital elements, configuration records, and the
//! derived per-body orientation state.

use std::fmt;
use std::str::FromStr;

use axial_math::{Vector3, wrap_two_pi};
use serde::{Deserialize, Serialize};

/// Julian date of the J2000.0 epoch.
pub const J2000_EPOCH_JD: f64 = 2_451_545.0;

/// Orbital plane of one body at epoch.
///
/// Deserialization goes through [`OrbitalElements::new`], so Ω read from a
/// file is wrapped the same way as Ω passed in code.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "OrbitalElementsRecord")]
pub struct OrbitalElements {
    /// Inclination to the ecliptic in radians. Domain `[0, π]`.
    pub inclination: f64,
    /// Longitude of the ascending node (Ω) in radians, kept in `[0, 2π)`.
    pub longitude_of_ascending_node: f64,
}

impl OrbitalElements {
    /// Create elements, wrapping Ω into `[0, 2π)`.
    ///
    /// Inclination is stored as given and validated when used.
    pub fn new(inclination: f64, longitude_of_ascending_node: f64) -> Self {
        Self {
            inclination,
            longitude_of_ascending_node: wrap_two_pi(longitude_of_ascending_node),
        }
    }

    /// Convenience constructor taking both angles in degrees.
    pub fn from_degrees(inclination_deg: f64, node_deg: f64) -> Self {
        Self::new(inclination_deg.to_radians(), node_deg.to_radians())
    }

    /// The reference plane itself: zero inclination, zero node.
    pub fn ecliptic() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// On-disk shape of [`OrbitalElements`], before Ω is wrapped.
#[derive(Deserialize)]
#[serde(rename = "OrbitalElements")]
struct OrbitalElementsRecord {
    inclination: f64,
    longitude_of_ascending_node: f64,
}

impl From<OrbitalElementsRecord> for OrbitalElements {
    fn from(record: OrbitalElementsRecord) -> Self {
        Self::new(record.inclination, record.longitude_of_ascending_node)
    }
}

/// Spin direction, independent of the geometric tilt.
///
/// Obliquity alone is ambiguous past 90°, so the sense is carried separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationSense {
    #[default]
    Prograde,
    Retrograde,
}

impl RotationSense {
    /// Legacy heuristic: obliquity strictly above `threshold_degrees` means
    /// retrograde. Lossy, see [`crate::LegacyMigrator`].
    pub fn infer_from_obliquity(obliquity_degrees: f64, threshold_degrees: f64) -> Self {
        if obliquity_degrees > threshold_degrees {
            Self::Retrograde
        } else {
            Self::Prograde
        }
    }

    /// +1 for prograde, −1 for retrograde.
    pub fn sign(self) -> f64 {
        match self {
            Self::Prograde => 1.0,
            Self::Retrograde => -1.0,
        }
    }
}

impl fmt::Display for RotationSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prograde => f.write_str("prograde"),
            Self::Retrograde => f.write_str("retrograde"),
        }
    }
}

impl FromStr for RotationSense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prograde" => Ok(Self::Prograde),
            "retrograde" => Ok(Self::Retrograde),
            other => Err(format!("unknown rotation sense '{other}'")),
        }
    }
}

/// Per-asset description of which local axis is the model's north pole.
///
/// One per asset family, not per body instance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// North-pole direction in the asset's local (render) space.
    pub north_axis: Vector3,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            north_axis: Vector3::Y,
        }
    }
}

impl ModelConfig {
    pub fn new(north_axis: Vector3) -> Self {
        Self { north_axis }
    }
}

/// Pre-vector configuration: a tilt in degrees plus optional sense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyObliquityConfig {
    /// Obliquity in degrees. Expected in `[0, 180]`.
    pub obliquity_degrees: f64,
    #[serde(default)]
    pub rotation_sense: Option<RotationSense>,
    #[serde(default)]
    pub model_north_axis: Option<Vector3>,
    /// Reserved; precession is not modeled.
    #[serde(default)]
    pub precession_rate: Option<f64>,
}

impl LegacyObliquityConfig {
    pub fn new(obliquity_degrees: f64) -> Self {
        Self {
            obliquity_degrees,
            rotation_sense: None,
            model_north_axis: None,
            precession_rate: None,
        }
    }

    pub fn with_rotation_sense(mut self, sense: RotationSense) -> Self {
        self.rotation_sense = Some(sense);
        self
    }
}

/// Vector-based configuration; `spin_axis` is authoritative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModernOrientationConfig {
    /// Spin axis in the ICRF/J2000 ecliptic frame (Z-up).
    pub spin_axis: Vector3,
    #[serde(default)]
    pub rotation_sense: RotationSense,
    #[serde(default)]
    pub model_north_axis: Option<Vector3>,
    /// Reserved; precession is not modeled.
    #[serde(default)]
    pub precession_rate: Option<f64>,
}

impl ModernOrientationConfig {
    pub fn new(spin_axis: Vector3, rotation_sense: RotationSense) -> Self {
        Self {
            spin_axis,
            rotation_sense,
            model_north_axis: None,
            precession_rate: None,
        }
    }

    /// Model config for this body, defaulting to +Y north.
    pub fn model_config(&self) -> ModelConfig {
        self.model_north_axis
            .map(ModelConfig::new)
            .unwrap_or_default()
    }
}

/// Per-body orientation input. Exactly one representation is authoritative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CelestialBodyOrientationConfig {
    SpinAxis(ModernOrientationConfig),
    Legacy(LegacyObliquityConfig),
}

/// One body as supplied by external providers: its orientation config and
/// orbital elements, either of which may be absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    #[serde(default)]
    pub orientation: Option<CelestialBodyOrientationConfig>,
    #[serde(default)]
    pub orbital_elements: Option<OrbitalElements>,
}

/// Derived, read-only orientation snapshot for one body.
///
/// Obliquity is always recomputed from the two vectors; it is never stored
/// independently of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CelestialBodyOrientationState {
    pub body_id: String,
    /// Orbital-plane normal, ICRF frame.
    pub orbital_normal: Vector3,
    /// Spin axis, ICRF frame.
    pub spin_axis: Vector3,
    /// Angle between the spin axis and the orbital normal, radians.
    pub obliquity: f64,
    pub rotation_sense: RotationSense,
    /// Epoch of the orbital elements as a Julian date.
    pub epoch_jd: f64,
}

impl CelestialBodyOrientationState {
    pub fn obliquity_degrees(&self) -> f64 {
        self.obliquity.to_degrees()
    }
}
