//! Physically correct orientation of rotating bodies from orbital geometry.
//!
//! Axial tilt is treated as a geometric relationship: the angle between a
//! body's spin-axis vector and its orbital-plane normal. The pipeline is
//!
//! ```text
//! OrbitalElements -> OrbitalCalculator -> (normal, ascending node)
//!     -> SpinAxisCalculator (+ obliquity) -> spin axis (ICRF, Z-up)
//!     -> FrameTransformer -> spin axis (render, Y-up)
//!     -> MeshOrientationManager -> Orientable target
//! ```
//!
//! Legacy per-body "obliquity in degrees" records are converted to the
//! vector form by [`LegacyMigrator`], which verifies the round trip.

mod catalogue;
mod error;
mod frame;
mod mesh;
mod migration;
mod orbital;
mod spin_axis;
mod state;
mod types;

pub use catalogue::{CatalogueBody, solar_system, solar_system_records};
pub use error::{OrientationError, Result};
pub use frame::{ECLIPTIC_NORMAL, FrameTransformer};
pub use mesh::{MeshOrientationManager, Orientable, Orientation, RenderBody, rotation_angle_at};
pub use migration::{
    BatchMigrationReport, LegacyMigrator, MigrationFailure, MigrationMetadata, MigrationOptions,
    MigrationResult, ValidationReport, migrate_legacy_obliquity, migrate_legacy_obliquity_batch,
    validate_migration,
};
pub use orbital::OrbitalCalculator;
pub use spin_axis::SpinAxisCalculator;
pub use state::{OrientationEvaluator, evaluate_records};
pub use types::{
    BodyRecord, CelestialBodyOrientationConfig, CelestialBodyOrientationState,
    J2000_EPOCH_JD, LegacyObliquityConfig, ModelConfig, ModernOrientationConfig,
    OrbitalElements, RotationSense,
};

pub use axial_math::{Quaternion, UNIT_VECTOR_TOLERANCE, Vector3};
