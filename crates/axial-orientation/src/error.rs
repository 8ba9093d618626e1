//! Orientation error types.

/// Domain-validation failures and missing-input conditions.
///
/// Numerical degeneracies (near-parallel vectors, unit-vector drift) are not
/// represented here; they are resolved in place and logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrientationError {
    /// Inclination outside `[0, π]` radians.
    #[error("inclination {value} rad is outside [0, π]")]
    InvalidInclination { value: f64 },

    /// Longitude of the ascending node is NaN or infinite.
    #[error("ascending node longitude {value} rad is not finite")]
    InvalidAscendingNode { value: f64 },

    /// Obliquity outside `[0, π]` radians.
    #[error("obliquity {value} rad is outside [0, π]")]
    InvalidObliquity { value: f64 },

    /// The body carries neither a spin axis nor a legacy obliquity.
    #[error("body '{body_id}' has no orientation configuration")]
    MissingOrientation { body_id: String },

    /// No orbital elements were supplied for the body.
    #[error("body '{body_id}' has no orbital elements")]
    MissingOrbitalElements { body_id: String },

    /// A vector that must define a direction has zero or non-finite length.
    #[error("{what} has zero or non-finite length")]
    DegenerateVector { what: &'static str },
}

pub type Result<T> = std::result::Result<T, OrientationError>;
