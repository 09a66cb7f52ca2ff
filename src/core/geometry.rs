// core/geometry.rs

// Quaternion helpers for waypoint headings. Pure functions over nalgebra value types.

use nalgebra::{Quaternion, UnitQuaternion, Vector2, Vector3};

/// Normalizes an orientation quaternion.
/// Returns `None` when the norm is zero or not finite, since no heading can be recovered.
pub fn normalized(orientation: &Quaternion<f64>) -> Option<UnitQuaternion<f64>> {
    let norm = orientation.norm();
    if !norm.is_finite() || norm <= f64::EPSILON {
        return None;
    }
    Some(UnitQuaternion::new_normalize(*orientation))
}

/// Rotates the local forward axis (1, 0, 0) by the normalized orientation and
/// returns its planar (x, y) components.
pub fn forward_direction(orientation: &Quaternion<f64>) -> Option<Vector2<f64>> {
    let unit = normalized(orientation)?;
    let forward = unit * Vector3::x();
    Some(forward.xy())
}

/// Quaternion for a heading of `yaw` radians about +z
pub fn yaw_to_quaternion(yaw: f64) -> Quaternion<f64> {
    UnitQuaternion::from_euler_angles(0.0, 0.0, yaw).into_inner()
}
