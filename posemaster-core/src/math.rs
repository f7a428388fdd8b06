//! Numeric helpers shared by the pose engine and the stores.
//!
//! All angles handled by the engine are Euler degrees. Rotations only become
//! radians or quaternions at the skeleton boundary (see [`crate::applier`]).

use serde::{Deserialize, Serialize};

/// Fold an angle in degrees into the half-open range `(-180, 180]`.
///
/// Angles already inside the range are returned unchanged, so the function is
/// exactly idempotent. Non-finite input is returned as-is.
///
/// ```
/// use posemaster_core::math::normalize_angle;
///
/// assert_eq!(normalize_angle(270.0), -90.0);
/// assert_eq!(normalize_angle(-180.0), 180.0);
/// assert_eq!(normalize_angle(45.0), 45.0);
/// ```
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() || (angle > -180.0 && angle <= 180.0) {
        return angle;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Linear interpolation between `a` and `b`. `t` is not clamped.
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics: `min <= max` is not checked, and
/// when the bounds are inverted `min` wins.
#[must_use]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Convert degrees to radians.
#[must_use]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Convert radians to degrees.
#[must_use]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

/// A plain 3-component vector as stored in camera and scene documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<glam::Vec3> for Vec3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for glam::Vec3 {
    fn from(v: Vec3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_angle_in_range_is_untouched() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(179.5), 179.5);
        assert_eq!(normalize_angle(-179.5), -179.5);
        assert_eq!(normalize_angle(180.0), 180.0);
    }

    #[test]
    fn test_normalize_angle_folds_out_of_range() {
        assert!((normalize_angle(360.0) - 0.0).abs() < 1e-4);
        assert!((normalize_angle(720.0) - 0.0).abs() < 1e-4);
        assert!((normalize_angle(190.0) - -170.0).abs() < 1e-4);
        assert!((normalize_angle(-190.0) - 170.0).abs() < 1e-4);
        assert!((normalize_angle(-540.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_angle_minus_180_maps_to_180() {
        assert_eq!(normalize_angle(-180.0), 180.0);
    }

    #[test]
    fn test_normalize_angle_tiny_negative_multiple() {
        let folded = normalize_angle(-360.0 - 1e-6);
        assert!(folded > -180.0 && folded <= 180.0);
    }

    #[test]
    fn test_normalize_angle_nan_propagates() {
        assert!(normalize_angle(f32::NAN).is_nan());
    }

    #[test]
    fn test_normalize_angle_infinities_pass_through() {
        assert_eq!(normalize_angle(f32::INFINITY), f32::INFINITY);
        assert_eq!(normalize_angle(f32::NEG_INFINITY), f32::NEG_INFINITY);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_clamp_inverted_bounds_does_not_panic() {
        assert_eq!(clamp(0.5, 1.0, 0.0), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 90.0, 0.5), 45.0);
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 20.0);
    }

    #[test]
    fn test_degree_radian_conversion() {
        assert!((degrees_to_radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((radians_to_degrees(std::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_vec3_glam_conversion() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let g: glam::Vec3 = v.into();
        assert_eq!(Vec3::from(g), v);
    }

    proptest! {
        #[test]
        fn prop_normalize_angle_in_half_open_range(angle in -1.0e5f32..1.0e5f32) {
            let folded = normalize_angle(angle);
            prop_assert!(folded > -180.0 && folded <= 180.0, "{angle} -> {folded}");
        }

        #[test]
        fn prop_normalize_angle_is_idempotent(angle in -1.0e5f32..1.0e5f32) {
            let once = normalize_angle(angle);
            prop_assert_eq!(normalize_angle(once), once);
        }

        #[test]
        fn prop_normalize_angle_is_periodic(angle in -720i32..720i32, k in -10i32..10i32) {
            #[allow(clippy::cast_precision_loss)]
            let (base, shifted) = (angle as f32, (angle + 360 * k) as f32);
            let a = normalize_angle(base);
            let b = normalize_angle(shifted);
            prop_assert!((a - b).abs() < 1e-3, "{base} -> {a}, {shifted} -> {b}");
        }
    }
}
