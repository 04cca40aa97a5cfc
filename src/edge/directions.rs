//! # Direction Taxonomy
//!
//! Static tables mapping angular buckets to semantic edge directions.
//!
//! ```text
//!                 2 StepLeft
//!          3               1
//!   4 StepBackward   ●→    0 StepForward
//!          5               7
//!                 6 StepRight
//! ```
//!
//! The default compass has 8 slices centred on multiples of π/4,
//! counter-clockwise from the source's viewing direction. Step directions
//! own the slice containing their target angle and fall back to its two
//! neighbours, counter-clockwise neighbour first.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
use smallvec::{smallvec, SmallVec};
use serde::{Deserialize, Serialize};
use crate::geo::wrap_angle;
use crate::model::{EdgeDirection, SequenceAdjacency};

/// Fewest slices a step compass may have. Four keeps every step direction
/// in its own slice.
pub const MIN_COMPASS_SLICES: usize = 4;

// ============================================================================
// Compass
// ============================================================================

/// `n` equal angular slices of the full circle.
///
/// Slice `k` is centred on `k · 2π / n` and covers the half-open interval
/// `[centre − w/2, centre + w/2)`, so an angle lying exactly on a boundary
/// belongs to the counter-clockwise slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compass {
    slices: usize,
}

impl Compass {
    /// A compass with `slices` slices. Zero is raised to one.
    pub fn new(slices: usize) -> Self {
        Self { slices: slices.max(1) }
    }

    pub fn slices(&self) -> usize {
        self.slices
    }

    pub fn width(&self) -> f64 {
        TAU / self.slices as f64
    }

    /// Centre angle of slice `index`, in `(-π, π]`.
    pub fn center(&self, index: usize) -> f64 {
        wrap_angle(index as f64 * self.width())
    }

    /// Slice containing `angle`.
    pub fn slice_of(&self, angle: f64) -> usize {
        let width = self.width();
        let shifted = (angle + width / 2.0).rem_euclid(TAU);
        (shifted / width).floor() as usize % self.slices
    }

    /// Counter-clockwise neighbour of `index`.
    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.slices
    }

    /// Clockwise neighbour of `index`.
    pub fn prev(&self, index: usize) -> usize {
        (index + self.slices - 1) % self.slices
    }
}

// ============================================================================
// Direction entries
// ============================================================================

/// A step direction and where it looks for candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDirection {
    pub direction: EdgeDirection,
    /// Target motion change.
    pub motion_change: f64,
    /// Primary compass slice.
    pub slice: usize,
    /// Slices tried in order when the primary slice yields nothing.
    pub fallbacks: SmallVec<[usize; 2]>,
    /// Whether a sequence neighbour closer than the step minimum may fill
    /// this direction as a last resort.
    pub use_sequence_fallback: bool,
}

/// A turn direction, classified by direction change.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnDirection {
    pub direction: EdgeDirection,
    pub direction_change: f64,
    /// Preferred motion while turning. `None` when any motion is fine.
    pub motion_change: Option<f64>,
    /// Accept rig neighbours rotated part of the way toward the target.
    pub allow_rig: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceDirection {
    pub direction: EdgeDirection,
    pub adjacency: SequenceAdjacency,
}

// ============================================================================
// Tables
// ============================================================================

/// Direction tables for every edge kind except pano, whose compass depends
/// on `pano_max_items`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCalculatorDirections {
    compass: Compass,
    steps: Vec<StepDirection>,
    turns: Vec<TurnDirection>,
    sequence: Vec<SequenceDirection>,
}

impl Default for EdgeCalculatorDirections {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeCalculatorDirections {
    /// Eight-slice compass.
    pub fn new() -> Self {
        Self::with_compass_slices(8)
    }

    /// Build tables over a compass of `slices` slices, raised to
    /// [`MIN_COMPASS_SLICES`] when smaller.
    pub fn with_compass_slices(slices: usize) -> Self {
        let compass = Compass::new(slices.max(MIN_COMPASS_SLICES));

        let step = |direction, motion_change: f64, use_sequence_fallback| {
            let slice = compass.slice_of(motion_change);
            StepDirection {
                direction,
                motion_change,
                slice,
                fallbacks: smallvec![compass.next(slice), compass.prev(slice)],
                use_sequence_fallback,
            }
        };

        let steps = vec![
            step(EdgeDirection::StepForward, 0.0, true),
            step(EdgeDirection::StepBackward, PI, true),
            step(EdgeDirection::StepLeft, FRAC_PI_2, false),
            step(EdgeDirection::StepRight, -FRAC_PI_2, false),
        ];

        let turns = vec![
            TurnDirection {
                direction: EdgeDirection::TurnLeft,
                direction_change: FRAC_PI_2,
                motion_change: Some(FRAC_PI_4),
                allow_rig: true,
            },
            TurnDirection {
                direction: EdgeDirection::TurnRight,
                direction_change: -FRAC_PI_2,
                motion_change: Some(-FRAC_PI_4),
                allow_rig: true,
            },
            TurnDirection {
                direction: EdgeDirection::TurnU,
                direction_change: PI,
                motion_change: None,
                allow_rig: false,
            },
        ];

        let sequence = vec![
            SequenceDirection { direction: EdgeDirection::Next, adjacency: SequenceAdjacency::Next },
            SequenceDirection { direction: EdgeDirection::Prev, adjacency: SequenceAdjacency::Prev },
        ];

        Self { compass, steps, turns, sequence }
    }

    pub fn compass(&self) -> Compass {
        self.compass
    }

    pub fn steps(&self) -> &[StepDirection] {
        &self.steps
    }

    pub fn turns(&self) -> &[TurnDirection] {
        &self.turns
    }

    pub fn sequence(&self) -> &[SequenceDirection] {
        &self.sequence
    }

    pub fn step(&self, direction: EdgeDirection) -> Option<&StepDirection> {
        self.steps.iter().find(|s| s.direction == direction)
    }
}
