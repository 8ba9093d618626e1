//! Angle conversions and wrapping.

use std::f64::consts::TAU;

/// Wrap an angle in radians into `[0, 2π)`.
///
/// Non-finite input is returned unchanged.
pub fn wrap_two_pi(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_wrap_in_range_is_unchanged() {
        assert_eq!(wrap_two_pi(0.0), 0.0);
        assert_eq!(wrap_two_pi(1.5), 1.5);
    }

    #[test]
    fn test_wrap_negative_and_large() {
        assert!((wrap_two_pi(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((wrap_two_pi(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(wrap_two_pi(TAU), 0.0);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_below_tau() {
        let w = wrap_two_pi(-1e-18);
        assert!((0.0..TAU).contains(&w), "wrapped to {w}");
    }

    #[test]
    fn test_degree_conversion() {
        assert!((deg_to_rad(180.0) - PI).abs() < 1e-15);
        assert!((rad_to_deg(PI / 2.0) - 90.0).abs() < 1e-12);
    }
}
