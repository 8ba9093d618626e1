//! f64 vector and quaternion primitives, angle helpers, and shared numeric
//! tolerances for the Axial orientation workspace.

mod angle;
mod quaternion;
mod vector;

pub use angle::{deg_to_rad, rad_to_deg, wrap_two_pi};
pub use quaternion::Quaternion;
pub use vector::Vector3;

/// Maximum allowed deviation of a direction's magnitude from 1.
pub const UNIT_VECTOR_TOLERANCE: f64 = 1e-10;

/// Cross products shorter than this are treated as coming from
/// (anti-)parallel inputs.
pub const CROSS_PRODUCT_TOLERANCE: f64 = 1e-10;
