//! # Edge Calculator
//!
//! Decides which potential edges of one source node become navigation
//! edges, and in which direction.
//!
//! ```text
//! Node + neighbours → compute_potential_edges() → [PotentialEdge]
//!   → compute_sequence_edges() ┐
//!   → compute_step_edges()     ├→ [Edge]
//!   → compute_turn_edges()     │
//!   → compute_pano_edges()     ┘
//! ```
//!
//! Every `compute_*_edges` is a pure function of its arguments and the
//! calculator's immutable tables. Output order is canonical (direction
//! table order, or slice index for pano) so equal inputs in any order give
//! equal outputs.

use hashbrown::HashSet;
use crate::geo::angle_difference;
use crate::model::{Edge, EdgeDirection, Node, NodeKey, PotentialEdge};
use crate::Result;
use super::directions::{Compass, EdgeCalculatorDirections, StepDirection};
use super::potential;
use super::ranking::{self, Candidate, Criterion, SliceBuckets, Target};
use super::settings::EdgeCalculatorSettings;

/// Stateless edge classifier. Safe to share between threads.
#[derive(Debug, Clone)]
pub struct EdgeCalculator {
    settings: EdgeCalculatorSettings,
    directions: EdgeCalculatorDirections,
    pano_compass: Compass,
}

impl Default for EdgeCalculator {
    fn default() -> Self {
        let settings = EdgeCalculatorSettings::default();
        let pano_compass = Compass::new(settings.pano_max_items);
        Self { settings, directions: EdgeCalculatorDirections::new(), pano_compass }
    }
}

impl EdgeCalculator {
    /// Build a calculator, rejecting inconsistent settings.
    pub fn new(
        settings: EdgeCalculatorSettings,
        directions: EdgeCalculatorDirections,
    ) -> Result<Self> {
        if let Err(e) = settings.validate() {
            tracing::warn!(error = %e, "rejected edge calculator settings");
            return Err(e);
        }
        let pano_compass = Compass::new(settings.pano_max_items);
        Ok(Self { settings, directions, pano_compass })
    }

    pub fn settings(&self) -> &EdgeCalculatorSettings {
        &self.settings
    }

    pub fn directions(&self) -> &EdgeCalculatorDirections {
        &self.directions
    }

    /// Feature extraction for `node` against its spatial neighbours.
    /// Candidates beyond every kind's max distance are dropped.
    pub fn compute_potential_edges(
        &self,
        node: &Node,
        candidates: &[Node],
    ) -> Result<Vec<PotentialEdge>> {
        potential::compute_potential_edges(node, candidates, self.settings.max_distance())
    }

    /// All edge kinds for `node`: sequence, step, turn, then pano.
    pub fn compute_edges(&self, node: &Node, potential_edges: &[PotentialEdge]) -> Vec<Edge> {
        let mut edges = self.compute_sequence_edges(node, potential_edges);
        edges.extend(self.compute_step_edges(node, potential_edges));
        edges.extend(self.compute_turn_edges(node, potential_edges));
        edges.extend(self.compute_pano_edges(node, potential_edges));

        tracing::debug!(node = %node.key, edges = edges.len(), "computed edges");
        edges
    }

    // ========================================================================
    // Sequence
    // ========================================================================

    /// Next / previous edges to the node's capture-sequence neighbours.
    pub fn compute_sequence_edges(
        &self,
        node: &Node,
        potential_edges: &[PotentialEdge],
    ) -> Vec<Edge> {
        check_contract(potential_edges);
        let s = &self.settings;
        let cascade = [
            Criterion::PreferSameSequence,
            Criterion::ClosestToDistance(s.sequence_preferred_distance),
        ];

        let mut edges = Vec::new();
        for sequence in self.directions.sequence() {
            let candidates = potential_edges
                .iter()
                .filter(|p| p.sequence_adjacency == Some(sequence.adjacency))
                .filter(|p| within(p.distance, s.sequence_min_distance, s.sequence_max_distance))
                .map(Candidate::new);

            if let Some(winner) = ranking::best(&cascade, &Target::default(), candidates) {
                edges.push(edge(node, winner.potential, sequence.direction));
            }
        }

        trace_selected(node, "sequence", &edges);
        edges
    }

    // ========================================================================
    // Step
    // ========================================================================

    /// Forward / backward / left / right translations between perspective
    /// images facing roughly the same way.
    pub fn compute_step_edges(&self, node: &Node, potential_edges: &[PotentialEdge]) -> Vec<Edge> {
        check_contract(potential_edges);
        if node.full_pano {
            return Vec::new();
        }

        let s = &self.settings;
        let compass = self.directions.compass();
        let mut buckets = SliceBuckets::new(compass);
        let mut too_close = Vec::new();

        for potential in potential_edges {
            if potential.full_pano || potential.distance > s.step_max_distance {
                continue;
            }
            if potential.direction_change.abs() > s.step_max_direction_change {
                continue;
            }
            if potential.distance < s.step_min_distance {
                // Sequence neighbours captured too close may still serve
                // forward and backward when nothing else does.
                if potential.sequence_adjacency.is_some() {
                    too_close.push(Candidate::new(potential));
                }
                continue;
            }
            buckets.insert(compass.slice_of(potential.motion_change), Candidate::new(potential));
        }

        let steps = self.directions.steps();
        let mut taken: HashSet<&NodeKey> = HashSet::new();
        let mut chosen: Vec<Option<&PotentialEdge>> = vec![None; steps.len()];

        for (slot, step) in steps.iter().enumerate() {
            chosen[slot] = self.pick_step(step, buckets.slice(step.slice), &taken);
            if let Some(p) = chosen[slot] {
                taken.insert(&p.to);
            }
        }

        for (slot, step) in steps.iter().enumerate() {
            if chosen[slot].is_some() {
                continue;
            }
            let fallback = step
                .fallbacks
                .iter()
                .find_map(|&slice| self.pick_step(step, buckets.slice(slice), &taken))
                .or_else(|| {
                    step.use_sequence_fallback
                        .then(|| self.pick_step(step, &too_close, &taken))
                        .flatten()
                });
            if let Some(p) = fallback {
                taken.insert(&p.to);
                chosen[slot] = Some(p);
            }
        }

        let edges: Vec<Edge> = steps
            .iter()
            .zip(chosen)
            .filter_map(|(step, p)| p.map(|p| edge(node, p, step.direction)))
            .collect();

        trace_selected(node, "step", &edges);
        edges
    }

    /// Best candidate for `step` among `candidates` that is within drift
    /// and not yet used by another step direction.
    fn pick_step<'p>(
        &self,
        step: &StepDirection,
        candidates: &[Candidate<'p>],
        taken: &HashSet<&NodeKey>,
    ) -> Option<&'p PotentialEdge> {
        let s = &self.settings;
        let cascade = [
            Criterion::PreferSameMergeCc,
            Criterion::PreferSameSequence,
            Criterion::SmallestMotionDeviation,
            Criterion::ClosestToDistance(s.step_preferred_distance),
            Criterion::SmallestRotation,
        ];
        let target = Target::motion(step.motion_change);

        ranking::ranked(&cascade, &target, candidates)
            .into_iter()
            .map(|c| c.potential)
            .filter(|p| target.motion_deviation(p) <= s.step_max_drift)
            .find(|p| !taken.contains(&p.to))
    }

    // ========================================================================
    // Turn
    // ========================================================================

    /// Left / right / U-turns: candidates whose viewing direction is rotated
    /// toward a turn target while staying roughly level.
    pub fn compute_turn_edges(&self, node: &Node, potential_edges: &[PotentialEdge]) -> Vec<Edge> {
        check_contract(potential_edges);
        if node.full_pano {
            return Vec::new();
        }

        let s = &self.settings;
        let cascade = [
            Criterion::PreferRig,
            Criterion::PreferSameMergeCc,
            Criterion::PreferSameSequence,
            Criterion::SmallestDirectionDeviation,
            Criterion::SmallestElevatedMotionDeviation,
            Criterion::SmallestDistance,
        ];

        let mut taken: HashSet<&NodeKey> = HashSet::new();
        let mut edges = Vec::new();

        for turn in self.directions.turns() {
            let candidates: Vec<Candidate<'_>> = potential_edges
                .iter()
                .filter(|p| !p.full_pano && p.distance <= s.turn_max_distance)
                .filter(|p| p.vertical_motion.abs() <= s.turn_max_vertical_motion)
                .filter_map(|p| {
                    let rig = turn.allow_rig
                        && p.distance < s.turn_max_rig_distance
                        && p.direction_change.abs() > s.turn_min_rig_direction_change
                        && p.direction_change * turn.direction_change > 0.0
                        && p.direction_change.abs() < turn.direction_change.abs();
                    let deviation = angle_difference(turn.direction_change, p.direction_change).abs();

                    if rig {
                        Some(Candidate::rig(p))
                    } else if deviation <= s.turn_max_direction_change {
                        Some(Candidate::new(p))
                    } else {
                        None
                    }
                })
                .collect();

            let target = Target::turn(turn.direction_change, turn.motion_change);
            let winner = ranking::ranked(&cascade, &target, &candidates)
                .into_iter()
                .find(|c| !taken.contains(&c.potential.to));

            if let Some(winner) = winner {
                taken.insert(&winner.potential.to);
                edges.push(edge(node, winner.potential, turn.direction));
            }
        }

        trace_selected(node, "turn", &edges);
        edges
    }

    // ========================================================================
    // Pano
    // ========================================================================

    /// One edge per angular slice to the best full panorama in that slice.
    ///
    /// Slicing uses motion change only, so a candidate's own heading never
    /// affects whether it is selected.
    pub fn compute_pano_edges(&self, node: &Node, potential_edges: &[PotentialEdge]) -> Vec<Edge> {
        check_contract(potential_edges);
        let s = &self.settings;

        let candidates = potential_edges
            .iter()
            .filter(|p| p.full_pano)
            .filter(|p| within(p.distance, s.pano_min_distance, s.pano_max_distance))
            .map(Candidate::new);

        let buckets = SliceBuckets::build(self.pano_compass, candidates, |p| p.motion_change);
        let cascade = [
            Criterion::PreferSameSequence,
            Criterion::PreferSameMergeCc,
            Criterion::ClosestToDistance(s.pano_preferred_distance),
            Criterion::SmallestMotionDeviation,
        ];

        let edges: Vec<Edge> = buckets
            .winners(&cascade)
            .into_iter()
            .map(|winner| edge(node, winner.potential, EdgeDirection::Pano))
            .collect();

        trace_selected(node, "pano", &edges);
        edges
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Malformed features would silently corrupt the navigation graph.
fn check_contract(potential_edges: &[PotentialEdge]) {
    for potential in potential_edges {
        assert!(
            potential.is_well_formed(),
            "malformed potential edge to {}: {:?}",
            potential.to,
            potential
        );
    }
}

#[inline]
fn within(distance: f64, min: f64, max: f64) -> bool {
    min <= distance && distance <= max
}

fn edge(node: &Node, potential: &PotentialEdge, direction: EdgeDirection) -> Edge {
    Edge {
        from: node.key.clone(),
        to: potential.to.clone(),
        direction,
        data: potential.edge_data(),
    }
}

fn trace_selected(node: &Node, kind: &'static str, edges: &[Edge]) {
    for e in edges {
        tracing::trace!(from = %node.key, to = %e.to, direction = %e.direction, kind, "selected edge");
    }
}
