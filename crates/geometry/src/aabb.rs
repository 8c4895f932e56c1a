use std::fmt::{Debug, Display};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box stored as two corners.
///
/// The layout is two packed `Vec3`s (24 bytes) so the type can be embedded in
/// GPU-facing records.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl From<(f32, f32, f32, f32, f32, f32)> for Aabb {
    fn from(value: (f32, f32, f32, f32, f32, f32)) -> Self {
        let value: [f32; 6] = value.into();
        Self::from(value)
    }
}

impl From<[f32; 6]> for Aabb {
    fn from(value: [f32; 6]) -> Self {
        let [min_x, min_y, min_z, max_x, max_y, max_z] = value;
        let min = Vec3::new(min_x, min_y, min_z);
        let max = Vec3::new(max_x, max_y, max_z);

        Self { min, max }
    }
}

impl FromIterator<Self> for Aabb {
    fn from_iter<T: IntoIterator<Item = Self>>(iter: T) -> Self {
        let mut out = Self::NULL;
        for aabb in iter {
            out.expand_to_fit(&aabb);
        }
        out
    }
}

impl Debug for Aabb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl Display for Aabb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // write [0.00, 0.00, 0.00] -> [1.00, 1.00, 1.00]
        write!(
            f,
            "[{:.2}, {:.2}, {:.2}] -> [{:.2}, {:.2}, {:.2}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::NULL
    }
}

impl Aabb {
    /// Inverted box; the identity for [`Aabb::expand_to_fit`].
    pub const NULL: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    #[must_use]
    pub fn new(min: impl Into<Vec3>, max: impl Into<Vec3>) -> Self {
        let min = min.into();
        let max = max.into();
        Self { min, max }
    }

    /// Smallest box holding three points, e.g. the corners of a triangle.
    #[must_use]
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            min: a.min(b).min(c),
            max: a.max(b).max(c),
        }
    }

    #[must_use]
    pub fn collides(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// `x*y + x*z + y*z` of the box extent.
    #[must_use]
    pub fn half_area(&self) -> f32 {
        half_area(self.lens())
    }

    /// Whether `other` lies entirely inside (or on the boundary of) `self`.
    #[must_use]
    pub fn contains_aabb(&self, other: &Self) -> bool {
        other.min.cmpge(self.min).all() && other.max.cmple(self.max).all()
    }

    pub fn expand_to_fit(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    #[must_use]
    pub fn lens(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Half the surface area of a box with the given extent.
#[must_use]
#[expect(
    clippy::suboptimal_flops,
    reason = "split costs must round exactly like unfused multiply and add"
)]
pub fn half_area(size: Vec3) -> f32 {
    size.x * size.y + size.x * size.z + size.y * size.z
}
