//! Image node in the navigation graph.

use serde::{Deserialize, Serialize};

/// Opaque image key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeKey(pub String);

impl NodeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Camera pose in the local topocentric frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// East, north, up in metres.
    pub position: [f64; 3],
    /// Angle-axis rotation, camera body → world.
    pub rotation: [f64; 3],
}

impl Pose {
    pub fn new(position: [f64; 3], rotation: [f64; 3]) -> Self {
        Self { position, rotation }
    }

    /// Level camera at `position` looking along azimuth `yaw`.
    pub fn from_yaw(position: [f64; 3], yaw: f64) -> Self {
        Self { position, rotation: [0.0, 0.0, yaw] }
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.rotation.iter()).all(|v| v.is_finite())
    }
}

/// An image node as seen by the edge calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub key: NodeKey,
    pub pose: Pose,
    pub sequence_key: String,
    /// Merge connected component. `None` when the node was never merged.
    pub merge_cc: Option<u64>,
    pub full_pano: bool,
    pub next_key: Option<NodeKey>,
    pub prev_key: Option<NodeKey>,
}

impl Node {
    pub fn new(key: impl Into<NodeKey>, pose: Pose, sequence_key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pose,
            sequence_key: sequence_key.into(),
            merge_cc: None,
            full_pano: false,
            next_key: None,
            prev_key: None,
        }
    }

    pub fn with_merge_cc(mut self, merge_cc: u64) -> Self {
        self.merge_cc = Some(merge_cc);
        self
    }

    pub fn with_full_pano(mut self, full_pano: bool) -> Self {
        self.full_pano = full_pano;
        self
    }

    pub fn with_next(mut self, key: impl Into<NodeKey>) -> Self {
        self.next_key = Some(key.into());
        self
    }

    pub fn with_prev(mut self, key: impl Into<NodeKey>) -> Self {
        self.prev_key = Some(key.into());
        self
    }
}
