//! Per-node pose accessor.

use nalgebra::{Rotation3, Vector3};
use crate::model::Pose;
use super::spatial;

/// World-frame view of a node's pose.
///
/// Holds the rotation built from the angle-axis vector so the viewing
/// direction is computed once per node during feature extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vector3<f64>,
    rotation: Rotation3<f64>,
}

impl Transform {
    pub fn new(pose: &Pose) -> Self {
        Self {
            position: Vector3::from(pose.position),
            rotation: Rotation3::from_scaled_axis(Vector3::from(pose.rotation)),
        }
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    /// Orientation (body → world).
    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    /// Unit vector the camera looks along, in world coordinates.
    pub fn viewing_direction(&self) -> Vector3<f64> {
        self.rotation * Vector3::x()
    }

    /// Elevation of the viewing direction above the horizon.
    pub fn viewing_elevation(&self) -> f64 {
        spatial::angle_to_plane(&self.viewing_direction(), &Vector3::z())
    }

    /// Motion vector from this transform to `other`.
    pub fn motion_to(&self, other: &Transform) -> Vector3<f64> {
        other.position - self.position
    }

    /// Angle of the rotation between this orientation and `other`'s.
    pub fn rotation_to(&self, other: &Transform) -> f64 {
        spatial::relative_rotation_angle(&self.rotation, &other.rotation)
    }
}
