//! # Geometry
//!
//! Angle arithmetic and pose math used by potential-edge feature extraction.
//!
//! Frame conventions:
//! - World: local topocentric, x east, y north, z up (metres)
//! - Camera body: x forward, y left, z up
//! - Rotations are counter-clockwise positive, angles in radians
//!
//! Nothing in here holds state.

pub mod spatial;
pub mod transform;

pub use spatial::{
    wrap_angle, angle_difference, distance, angle_between_vector2, angle_to_plane,
    relative_rotation_angle,
};
pub use transform::Transform;
