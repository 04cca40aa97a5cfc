//! End-to-end tests for pano edge selection.
//!
//! Covers the distance window, the full-pano filter, rotation invariance,
//! the per-slice tie-break cascade and slice collapsing.

use std::f64::consts::PI;
use pretty_assertions::assert_eq;
use pano_edges::{
    Edge, EdgeCalculator, EdgeCalculatorDirections, EdgeCalculatorSettings, EdgeDirection, Node,
    Pose, PotentialEdge,
};

// ============================================================================
// Helpers
// ============================================================================

fn settings() -> EdgeCalculatorSettings {
    EdgeCalculatorSettings {
        pano_min_distance: 0.1,
        pano_max_distance: 20.0,
        pano_preferred_distance: 5.0,
        pano_max_items: 4,
        ..Default::default()
    }
}

fn calculator() -> EdgeCalculator {
    EdgeCalculator::new(settings(), EdgeCalculatorDirections::new()).unwrap()
}

fn source() -> Node {
    Node::new("source", Pose::from_yaw([0.0, 0.0, 0.0], 0.0), "seq")
}

fn pano(key: &str, distance: f64) -> PotentialEdge {
    let mut potential = PotentialEdge::new(key);
    potential.distance = distance;
    potential.full_pano = true;
    potential
}

fn targets(edges: &[Edge]) -> Vec<&str> {
    edges.iter().map(|e| e.to.as_str()).collect()
}

// ============================================================================
// 1. Single candidate
// ============================================================================

#[test]
fn test_has_pano_edge() {
    let p = pano("pkey1", settings().pano_max_distance / 2.0);
    let edges = calculator().compute_pano_edges(&source(), &[p]);

    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].to.as_str(), "pkey1");
    assert_eq!(edges[0].from.as_str(), "source");
    assert_eq!(edges[0].direction, EdgeDirection::Pano);
    assert_eq!(edges[0].data.distance, 10.0);
}

#[test]
fn test_has_pano_edge_irrespective_of_rotation() {
    let mut p = pano("pkey1", settings().pano_max_distance / 2.0);
    p.direction_change = PI;

    let edges = calculator().compute_pano_edges(&source(), &[p]);

    assert_eq!(targets(&edges), vec!["pkey1"]);
    assert_eq!(edges[0].direction, EdgeDirection::Pano);
}

#[test]
fn test_no_pano_edge_when_too_far() {
    let p = pano("pkey1", settings().pano_max_distance + 1.0);
    assert!(calculator().compute_pano_edges(&source(), &[p]).is_empty());
}

#[test]
fn test_no_pano_edge_when_too_close() {
    let p = pano("pkey1", settings().pano_min_distance / 2.0);
    assert!(calculator().compute_pano_edges(&source(), &[p]).is_empty());
}

#[test]
fn test_window_bounds_are_inclusive() {
    let near = pano("near", settings().pano_min_distance);
    let mut far = pano("far", settings().pano_max_distance);
    far.motion_change = PI;

    let edges = calculator().compute_pano_edges(&source(), &[near, far]);
    assert_eq!(targets(&edges), vec!["near", "far"]);
}

#[test]
fn test_no_pano_edge_for_non_full_pano() {
    let mut p = pano("pkey1", settings().pano_max_distance / 2.0);
    p.full_pano = false;
    assert!(calculator().compute_pano_edges(&source(), &[p]).is_empty());
}

#[test]
fn test_pano_source_still_gets_pano_edges() {
    let node = source().with_full_pano(true);
    let p = pano("pkey1", 5.0);
    assert_eq!(targets(&calculator().compute_pano_edges(&node, &[p])), vec!["pkey1"]);
}

// ============================================================================
// 2. Tie-break cascade within one slice
// ============================================================================

fn pair() -> (PotentialEdge, PotentialEdge) {
    let preferred = settings().pano_preferred_distance;
    (pano("pkey1", preferred), pano("pkey2", preferred))
}

#[test]
fn test_closest_to_preferred_distance_above() {
    let (mut p1, p2) = pair();
    p1.distance = settings().pano_preferred_distance + 1.0;

    let edges = calculator().compute_pano_edges(&source(), &[p1, p2]);
    assert_eq!(targets(&edges), vec!["pkey2"]);
}

#[test]
fn test_closest_to_preferred_distance_below() {
    let (mut p1, p2) = pair();
    p1.distance = settings().pano_preferred_distance - 1.0;

    let edges = calculator().compute_pano_edges(&source(), &[p1, p2]);
    assert_eq!(targets(&edges), vec!["pkey2"]);
}

#[test]
fn test_same_sequence_preferred() {
    let (mut p1, mut p2) = pair();
    p1.same_sequence = false;
    p2.same_sequence = true;

    let edges = calculator().compute_pano_edges(&source(), &[p1, p2]);
    assert_eq!(targets(&edges), vec!["pkey2"]);
}

#[test]
fn test_same_merge_cc_preferred() {
    let (mut p1, mut p2) = pair();
    p1.same_merge_cc = false;
    p2.same_merge_cc = true;

    let edges = calculator().compute_pano_edges(&source(), &[p1, p2]);
    assert_eq!(targets(&edges), vec!["pkey2"]);
}

#[test]
fn test_smallest_motion_change_preferred() {
    let (mut p1, mut p2) = pair();
    p1.motion_change = 0.2;
    p2.motion_change = 0.1;

    let edges = calculator().compute_pano_edges(&source(), &[p1, p2]);
    assert_eq!(targets(&edges), vec!["pkey2"]);
}

#[test]
fn test_same_sequence_outranks_preferred_distance() {
    let (mut p1, mut p2) = pair();
    p1.same_sequence = true;
    p1.distance = 15.0;
    p2.same_merge_cc = true;

    let edges = calculator().compute_pano_edges(&source(), &[p1, p2]);
    assert_eq!(targets(&edges), vec!["pkey1"]);
}

#[test]
fn test_full_tie_resolved_by_key() {
    let (p1, p2) = pair();
    let forward = calculator().compute_pano_edges(&source(), &[p1.clone(), p2.clone()]);
    let reversed = calculator().compute_pano_edges(&source(), &[p2, p1]);

    assert_eq!(targets(&forward), vec!["pkey1"]);
    assert_eq!(forward, reversed);
}

// ============================================================================
// 3. Slicing
// ============================================================================

fn four() -> Vec<PotentialEdge> {
    let half = settings().pano_max_distance / 2.0;
    (1..=4).map(|i| pano(&format!("pkey{}", i), half)).collect()
}

#[test]
fn test_pano_edges_in_four_directions() {
    let mut p = four();
    p[0].motion_change = 0.0;
    p[1].motion_change = PI / 2.0;
    p[2].motion_change = PI;
    p[3].motion_change = -PI / 2.0;

    let edges = calculator().compute_pano_edges(&source(), &p);

    assert_eq!(targets(&edges), vec!["pkey1", "pkey2", "pkey3", "pkey4"]);
    assert!(edges.iter().all(|e| e.direction == EdgeDirection::Pano));
}

#[test]
fn test_no_multiple_pano_edges_in_same_slice() {
    let mut p = four();
    p[0].motion_change = 0.0;
    p[1].motion_change = PI / 36.0;
    p[2].motion_change = PI;
    p[3].motion_change = -35.0 * PI / 36.0;

    let edges = calculator().compute_pano_edges(&source(), &p);

    assert_eq!(targets(&edges), vec!["pkey1", "pkey3"]);
}

#[test]
fn test_slice_boundary_belongs_to_counter_clockwise_slice() {
    let mut on_edge = pano("edge", 5.0);
    on_edge.motion_change = PI / 4.0;
    let mut left = pano("left", 5.0);
    left.motion_change = PI / 2.0;

    // Both land in the left slice; the one at its centre wins.
    let edges = calculator().compute_pano_edges(&source(), &[on_edge, left]);
    assert_eq!(targets(&edges), vec!["left"]);
}

#[test]
fn test_more_items_means_finer_slices() {
    let mut s = settings();
    s.pano_max_items = 8;
    let calc = EdgeCalculator::new(s, EdgeCalculatorDirections::new()).unwrap();

    let mut a = pano("a", 5.0);
    a.motion_change = 0.0;
    let mut b = pano("b", 5.0);
    b.motion_change = PI / 5.0;

    assert_eq!(targets(&calc.compute_pano_edges(&source(), &[a.clone(), b.clone()])), vec!["a", "b"]);
    assert_eq!(targets(&calculator().compute_pano_edges(&source(), &[a, b])).len(), 1);
}

#[test]
fn test_edge_data_echoes_features() {
    let mut p = pano("pkey1", 7.5);
    p.motion_change = 0.3;
    p.vertical_motion = -0.1;
    p.world_motion_azimuth = 1.2;

    let edges = calculator().compute_pano_edges(&source(), &[p]);
    let data = edges[0].data;
    assert_eq!(data.distance, 7.5);
    assert_eq!(data.motion_change, 0.3);
    assert_eq!(data.vertical_motion, -0.1);
    assert_eq!(data.world_motion_azimuth, 1.2);
}
