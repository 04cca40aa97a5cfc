//! Per-candidate geometric features.

use serde::{Deserialize, Serialize};
use super::{EdgeData, NodeKey};

/// Position of a candidate in the source node's capture sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceAdjacency {
    Next,
    Prev,
}

/// Features of one (source, candidate) pair.
///
/// Derived purely from the two nodes. Built fresh for every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialEdge {
    /// Candidate key.
    pub to: NodeKey,
    pub distance: f64,
    /// Horizontal motion angle relative to the source's viewing direction.
    pub motion_change: f64,
    /// Elevation angle of the motion vector.
    pub vertical_motion: f64,
    /// Horizontal viewing angle of the candidate relative to the source.
    pub direction_change: f64,
    pub vertical_direction_change: f64,
    /// Total relative rotation, `[0, π]`.
    pub rotation: f64,
    pub world_motion_azimuth: f64,
    pub same_sequence: bool,
    pub same_merge_cc: bool,
    pub full_pano: bool,
    pub sequence_adjacency: Option<SequenceAdjacency>,
}

impl PotentialEdge {
    /// A candidate at zero distance with no motion, rotation or shared flags.
    pub fn new(to: impl Into<NodeKey>) -> Self {
        Self {
            to: to.into(),
            distance: 0.0,
            motion_change: 0.0,
            vertical_motion: 0.0,
            direction_change: 0.0,
            vertical_direction_change: 0.0,
            rotation: 0.0,
            world_motion_azimuth: 0.0,
            same_sequence: false,
            same_merge_cc: false,
            full_pano: false,
            sequence_adjacency: None,
        }
    }

    /// True when every numeric feature is finite and distance is non-negative.
    pub fn is_well_formed(&self) -> bool {
        let finite = [
            self.distance,
            self.motion_change,
            self.vertical_motion,
            self.direction_change,
            self.vertical_direction_change,
            self.rotation,
            self.world_motion_azimuth,
        ]
        .iter()
        .all(|v| v.is_finite());
        finite && self.distance >= 0.0
    }

    pub fn edge_data(&self) -> EdgeData {
        EdgeData {
            distance: self.distance,
            world_motion_azimuth: self.world_motion_azimuth,
            vertical_motion: self.vertical_motion,
            motion_change: self.motion_change,
            direction_change: self.direction_change,
        }
    }
}
