//! Sampled surface-area split selection.
//!
//! Every node is tested against a small fixed grid of planes per axis rather
//! than against every triangle boundary. A candidate costs
//! `n_left * half_area(left) + n_right * half_area(right)`; the factor of two
//! of the real surface area is dropped everywhere, so comparisons are
//! unaffected.

use geometry::{aabb::Aabb, bounding_box::BoundingBox};
use glam::Vec3;

use crate::triangle::BuildTriangle;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SplitCandidate {
    pub axis: usize,
    pub position: f32,
    pub cost: f32,
}

impl SplitCandidate {
    /// Returned for ranges that can never be worth splitting.
    pub const NONE: Self = Self {
        axis: 0,
        position: 0.0,
        cost: f32::INFINITY,
    };
}

/// Cost of keeping `triangle_count` triangles inside a box of extent `size`.
#[must_use]
pub fn node_cost(size: Vec3, triangle_count: usize) -> f32 {
    geometry::aabb::half_area(size) * triangle_count as f32
}

/// Whether a triangle lands on the left of the plane `axis = position`.
#[must_use]
pub fn is_left(triangle: &BuildTriangle, axis: usize, position: f32) -> bool {
    triangle.centroid[axis] < position
}

/// Cost of splitting `triangles` by the plane `axis = position`.
#[must_use]
pub fn evaluate_split(triangles: &[BuildTriangle], axis: usize, position: f32) -> f32 {
    let mut bounds_left = BoundingBox::EMPTY;
    let mut bounds_right = BoundingBox::EMPTY;
    let mut num_left = 0;
    let mut num_right = 0;

    for tri in triangles {
        if is_left(tri, axis, position) {
            bounds_left.grow_to_include_aabb(&tri.aabb);
            num_left += 1;
        } else {
            bounds_right.grow_to_include_aabb(&tri.aabb);
            num_right += 1;
        }
    }

    node_cost(bounds_left.size(), num_left) + node_cost(bounds_right.size(), num_right)
}

/// Plane positions tested on one axis: `splits` planes at `t = (i + 1) / (splits + 1)`.
#[expect(
    clippy::suboptimal_flops,
    reason = "plane positions must round exactly like unfused multiply and add"
)]
pub fn candidate_positions(bounds: &Aabb, axis: usize, splits: u32) -> impl Iterator<Item = f32> {
    let min = bounds.min[axis];
    let max = bounds.max[axis];
    let steps = splits as f32 + 1.0;

    (1..=splits).map(move |i| {
        let t = i as f32 / steps;
        min + (max - min) * t
    })
}

/// Picks the cheapest of the sampled planes over all three axes.
///
/// Only a strictly lower cost replaces the current best, so among equal costs
/// the first one found wins: lower axis first, then lower plane position.
#[must_use]
pub fn choose_split(
    bounds: &Aabb,
    triangles: &[BuildTriangle],
    splits_per_axis: u32,
) -> SplitCandidate {
    if triangles.len() <= 1 || splits_per_axis == 0 {
        return SplitCandidate::NONE;
    }

    let mut best = SplitCandidate {
        axis: 0,
        position: 0.0,
        cost: f32::MAX,
    };

    for axis in 0..3 {
        for position in candidate_positions(bounds, axis, splits_per_axis) {
            let cost = evaluate_split(triangles, axis, position);
            if cost < best.cost {
                best = SplitCandidate {
                    axis,
                    position,
                    cost,
                };
            }
        }
    }

    best
}
