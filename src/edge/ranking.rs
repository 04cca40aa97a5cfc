//! # Bucket Ranking
//!
//! The selection routine shared by every edge kind: candidates are placed in
//! buckets, and each bucket ranks its members with a cascade of
//! [`Criterion`]s. The first criterion that tells two candidates apart
//! decides; the candidate key breaks any remaining tie, so a ranking never
//! depends on input order.
//!
//! Each kind supplies its own cascade.

use std::cmp::Ordering;
use hashbrown::HashMap;
use crate::geo::angle_difference;
use crate::model::PotentialEdge;
use super::directions::Compass;

/// One tie-break rule. `Ordering::Less` means the left candidate is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    /// Rig matches first.
    PreferRig,
    PreferSameSequence,
    PreferSameMergeCc,
    /// Distance closest to the given preferred distance.
    ClosestToDistance(f64),
    /// Motion change closest to the bucket's motion target.
    SmallestMotionDeviation,
    /// Direction change closest to the bucket's direction target.
    SmallestDirectionDeviation,
    /// Motion deviation combined with vertical motion,
    /// `sqrt(motion_deviation² + vertical_motion²)`.
    SmallestElevatedMotionDeviation,
    SmallestRotation,
    SmallestDistance,
}

/// Angular reference of a bucket. Missing targets make the matching
/// deviation criteria neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Target {
    pub motion_change: Option<f64>,
    pub direction_change: Option<f64>,
}

impl Target {
    pub fn motion(motion_change: f64) -> Self {
        Self { motion_change: Some(motion_change), direction_change: None }
    }

    pub fn turn(direction_change: f64, motion_change: Option<f64>) -> Self {
        Self { motion_change, direction_change: Some(direction_change) }
    }

    pub fn motion_deviation(&self, potential: &PotentialEdge) -> f64 {
        self.motion_change
            .map(|target| angle_difference(target, potential.motion_change).abs())
            .unwrap_or(0.0)
    }

    pub fn direction_deviation(&self, potential: &PotentialEdge) -> f64 {
        self.direction_change
            .map(|target| angle_difference(target, potential.direction_change).abs())
            .unwrap_or(0.0)
    }
}

/// A potential edge admitted to a bucket.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'p> {
    pub potential: &'p PotentialEdge,
    pub rig: bool,
}

impl<'p> Candidate<'p> {
    pub fn new(potential: &'p PotentialEdge) -> Self {
        Self { potential, rig: false }
    }

    pub fn rig(potential: &'p PotentialEdge) -> Self {
        Self { potential, rig: true }
    }
}

impl Criterion {
    fn compare(&self, target: &Target, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        let (pa, pb) = (a.potential, b.potential);
        match *self {
            Criterion::PreferRig => b.rig.cmp(&a.rig),
            Criterion::PreferSameSequence => pb.same_sequence.cmp(&pa.same_sequence),
            Criterion::PreferSameMergeCc => pb.same_merge_cc.cmp(&pa.same_merge_cc),
            Criterion::ClosestToDistance(preferred) => (pa.distance - preferred)
                .abs()
                .total_cmp(&(pb.distance - preferred).abs()),
            Criterion::SmallestMotionDeviation => target
                .motion_deviation(pa)
                .total_cmp(&target.motion_deviation(pb)),
            Criterion::SmallestDirectionDeviation => target
                .direction_deviation(pa)
                .total_cmp(&target.direction_deviation(pb)),
            Criterion::SmallestElevatedMotionDeviation => {
                elevated_deviation(target, pa).total_cmp(&elevated_deviation(target, pb))
            }
            Criterion::SmallestRotation => pa.rotation.total_cmp(&pb.rotation),
            Criterion::SmallestDistance => pa.distance.total_cmp(&pb.distance),
        }
    }
}

fn elevated_deviation(target: &Target, potential: &PotentialEdge) -> f64 {
    target.motion_deviation(potential).hypot(potential.vertical_motion)
}

/// Compare two candidates under `cascade`, falling back to the key.
pub fn compare(
    cascade: &[Criterion],
    target: &Target,
    a: &Candidate<'_>,
    b: &Candidate<'_>,
) -> Ordering {
    cascade
        .iter()
        .map(|criterion| criterion.compare(target, a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.potential.to.cmp(&b.potential.to))
}

/// Best candidate of `candidates` under `cascade`.
pub fn best<'p>(
    cascade: &[Criterion],
    target: &Target,
    candidates: impl IntoIterator<Item = Candidate<'p>>,
) -> Option<Candidate<'p>> {
    candidates
        .into_iter()
        .min_by(|a, b| compare(cascade, target, a, b))
}

/// `candidates` ordered best first.
pub fn ranked<'p>(
    cascade: &[Criterion],
    target: &Target,
    candidates: &[Candidate<'p>],
) -> Vec<Candidate<'p>> {
    let mut ordered = candidates.to_vec();
    ordered.sort_by(|a, b| compare(cascade, target, a, b));
    ordered
}

// ============================================================================
// Compass buckets
// ============================================================================

/// Candidates bucketed by a compass slice. Only occupied slices are stored.
#[derive(Debug, Clone)]
pub struct SliceBuckets<'p> {
    compass: Compass,
    buckets: HashMap<usize, Vec<Candidate<'p>>>,
}

impl<'p> SliceBuckets<'p> {
    pub fn new(compass: Compass) -> Self {
        Self { compass, buckets: HashMap::new() }
    }

    /// Bucket every candidate by the angle `feature` selects.
    pub fn build<F>(
        compass: Compass,
        candidates: impl IntoIterator<Item = Candidate<'p>>,
        feature: F,
    ) -> Self
    where
        F: Fn(&PotentialEdge) -> f64,
    {
        let mut buckets = Self::new(compass);
        for candidate in candidates {
            let slice = compass.slice_of(feature(candidate.potential));
            buckets.insert(slice, candidate);
        }
        buckets
    }

    pub fn insert(&mut self, slice: usize, candidate: Candidate<'p>) {
        self.buckets.entry(slice).or_default().push(candidate);
    }

    pub fn slice(&self, index: usize) -> &[Candidate<'p>] {
        self.buckets.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Winner of every occupied slice, ranked against the slice centre and
    /// ordered by slice index.
    pub fn winners(&self, cascade: &[Criterion]) -> Vec<Candidate<'p>> {
        let mut occupied: Vec<usize> = self.buckets.keys().copied().collect();
        occupied.sort_unstable();

        occupied
            .into_iter()
            .filter_map(|index| {
                let target = Target::motion(self.compass.center(index));
                best(cascade, &target, self.slice(index).iter().copied())
            })
            .collect()
    }
}
