//! Spatial primitives: angle wrapping, distances and rotation angles.
//!
//! Every angle returned by this module that represents a *direction* lies in
//! `(-π, π]`. Both `π` and `-π` wrap to `+π`.

use std::f64::consts::{PI, TAU};
use nalgebra::{Rotation3, Vector3};

// ============================================================================
// Angles
// ============================================================================

/// Wrap any finite angle into `(-π, π]`.
///
/// ```
/// use pano_edges::geo::wrap_angle;
/// use std::f64::consts::PI;
///
/// assert_eq!(wrap_angle(PI), PI);
/// assert_eq!(wrap_angle(-PI), PI);
/// assert!((wrap_angle(PI / 2.0 + 2.0 * PI) - PI / 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Signed difference `a - b`, wrapped into `(-π, π]`.
#[inline]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    wrap_angle(a - b)
}

/// Signed planar angle from `v1` to `v2`, counter-clockwise positive.
///
/// Only the x and y components are used.
pub fn angle_between_vector2(v1: [f64; 2], v2: [f64; 2]) -> f64 {
    let a1 = v1[1].atan2(v1[0]);
    let a2 = v2[1].atan2(v2[0]);
    wrap_angle(a2 - a1)
}

/// Elevation of `vector` above the plane with the given `normal`.
///
/// Zero-length input has no elevation and returns `0.0`.
pub fn angle_to_plane(vector: &Vector3<f64>, normal: &Vector3<f64>) -> f64 {
    let norm = vector.norm() * normal.norm();
    if norm == 0.0 {
        return 0.0;
    }
    (vector.dot(normal) / norm).clamp(-1.0, 1.0).asin()
}

// ============================================================================
// Positions and orientations
// ============================================================================

/// Euclidean distance between two positions.
#[inline]
pub fn distance(p1: &Vector3<f64>, p2: &Vector3<f64>) -> f64 {
    (p2 - p1).norm()
}

/// Angle of the rotation taking orientation `r1` to orientation `r2`, in
/// `[0, π]`.
#[inline]
pub fn relative_rotation_angle(r1: &Rotation3<f64>, r2: &Rotation3<f64>) -> f64 {
    r1.angle_to(r2)
}
