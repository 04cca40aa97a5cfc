//! Navigation edges produced by the calculator.

use serde::{Deserialize, Serialize};
use super::NodeKey;

/// Family an edge direction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Sequence,
    Step,
    Turn,
    Pano,
}

/// Semantic navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeDirection {
    Next,
    Prev,
    StepForward,
    StepBackward,
    StepLeft,
    StepRight,
    TurnLeft,
    TurnRight,
    TurnU,
    Pano,
}

impl EdgeDirection {
    pub fn kind(self) -> EdgeKind {
        match self {
            EdgeDirection::Next | EdgeDirection::Prev => EdgeKind::Sequence,
            EdgeDirection::StepForward
            | EdgeDirection::StepBackward
            | EdgeDirection::StepLeft
            | EdgeDirection::StepRight => EdgeKind::Step,
            EdgeDirection::TurnLeft | EdgeDirection::TurnRight | EdgeDirection::TurnU => {
                EdgeKind::Turn
            }
            EdgeDirection::Pano => EdgeKind::Pano,
        }
    }
}

impl std::fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EdgeDirection::Next => "next",
            EdgeDirection::Prev => "prev",
            EdgeDirection::StepForward => "step_forward",
            EdgeDirection::StepBackward => "step_backward",
            EdgeDirection::StepLeft => "step_left",
            EdgeDirection::StepRight => "step_right",
            EdgeDirection::TurnLeft => "turn_left",
            EdgeDirection::TurnRight => "turn_right",
            EdgeDirection::TurnU => "turn_u",
            EdgeDirection::Pano => "pano",
        };
        f.write_str(name)
    }
}

/// Geometry carried on an edge for the viewer's navigation UI.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    pub distance: f64,
    /// Motion azimuth in the world frame, counter-clockwise from east.
    pub world_motion_azimuth: f64,
    pub vertical_motion: f64,
    pub motion_change: f64,
    pub direction_change: f64,
}

/// A directed, typed navigation edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeKey,
    pub to: NodeKey,
    pub direction: EdgeDirection,
    pub data: EdgeData,
}

impl Edge {
    pub fn kind(&self) -> EdgeKind {
        self.direction.kind()
    }
}
