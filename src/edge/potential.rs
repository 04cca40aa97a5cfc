//! Potential-edge feature extraction.
//!
//! Turns a source node and its spatial neighbours into [`PotentialEdge`]s.
//! Nodes are only read.

use nalgebra::Vector3;
use crate::geo::{spatial, Transform};
use crate::model::{Node, PotentialEdge, SequenceAdjacency};
use crate::{Error, Result};

/// Compute features for every candidate within `max_distance` of `node`.
///
/// The source itself is skipped when it appears among the candidates.
/// Output order follows `candidates`.
pub fn compute_potential_edges(
    node: &Node,
    candidates: &[Node],
    max_distance: f64,
) -> Result<Vec<PotentialEdge>> {
    ensure_finite(node)?;

    let source = Transform::new(&node.pose);
    let direction = source.viewing_direction();
    let elevation = source.viewing_elevation();

    let mut potential_edges = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.key == node.key {
            continue;
        }
        ensure_finite(candidate)?;

        let target = Transform::new(&candidate.pose);
        let motion = source.motion_to(&target);
        let distance = spatial::distance(source.position(), target.position());
        if distance > max_distance {
            tracing::trace!(from = %node.key, to = %candidate.key, distance, "candidate out of range");
            continue;
        }

        let target_direction = target.viewing_direction();

        let sequence_adjacency = if node.next_key.as_ref() == Some(&candidate.key) {
            Some(SequenceAdjacency::Next)
        } else if node.prev_key.as_ref() == Some(&candidate.key) {
            Some(SequenceAdjacency::Prev)
        } else {
            None
        };

        potential_edges.push(PotentialEdge {
            to: candidate.key.clone(),
            distance,
            motion_change: spatial::angle_between_vector2(
                [direction.x, direction.y],
                [motion.x, motion.y],
            ),
            vertical_motion: spatial::angle_to_plane(&motion, &Vector3::z()),
            direction_change: spatial::angle_between_vector2(
                [direction.x, direction.y],
                [target_direction.x, target_direction.y],
            ),
            vertical_direction_change: target.viewing_elevation() - elevation,
            rotation: source.rotation_to(&target),
            world_motion_azimuth: spatial::angle_between_vector2([1.0, 0.0], [motion.x, motion.y]),
            same_sequence: candidate.sequence_key == node.sequence_key,
            same_merge_cc: candidate.merge_cc == node.merge_cc,
            full_pano: candidate.full_pano,
            sequence_adjacency,
        });
    }

    tracing::debug!(
        node = %node.key,
        candidates = candidates.len(),
        potential = potential_edges.len(),
        "computed potential edges"
    );

    Ok(potential_edges)
}

fn ensure_finite(node: &Node) -> Result<()> {
    if node.pose.is_finite() {
        return Ok(());
    }
    Err(Error::InvalidPose {
        key: node.key.clone(),
        message: format!("non-finite pose {:?}", node.pose),
    })
}
