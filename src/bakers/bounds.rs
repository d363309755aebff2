// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

pub const DEFAULT_PADDING: Float = 0.1;

/// Where the aggregated box starts before points are folded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsSeed {
    /// Zero-size box at the origin; the origin always ends up inside.
    Origin,
    /// Zero-size box on the first point.
    FirstPoint,
}

impl Default for BoundsSeed {
    fn default() -> Self {
        BoundsSeed::Origin
    }
}

impl BoundsSeed {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "origin" => Some(BoundsSeed::Origin),
            "first_point" | "first" => Some(BoundsSeed::FirstPoint),
            _ => None,
        }
    }
}

/// Tight box around `points`.
///
/// An empty slice yields a zero-size box at the origin; callers that care must
/// check for that themselves.
pub fn encapsulate(points: &[Vector3f], seed: BoundsSeed) -> AABB {
    let start = match (seed, points.first()) {
        (BoundsSeed::FirstPoint, Some(p)) => *p,
        _ => Vector3f::zeros(),
    };
    let mut bounds = AABB::from_point(start);
    for p in points {
        bounds.expand_by_point(p);
    }
    bounds
}

/// Push every face out by `padding` times the box size on that axis.
pub fn pad(bounds: &AABB, padding: Float) -> AABB {
    let mut padded = *bounds;
    padded.expand_symmetric(&(bounds.diagnal() * padding));
    padded
}

pub fn aggregate_bounds(points: &[Vector3f], padding: Float, seed: BoundsSeed) -> AABB {
    pad(&encapsulate(points, seed), padding)
}
