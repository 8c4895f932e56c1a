use bytemuck::{Pod, Zeroable};
use geometry::aabb::Aabb;
use glam::Vec3;

/// Per-triangle summary used while partitioning. Only ever moved, never
/// modified.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BuildTriangle {
    pub centroid: Vec3,
    pub aabb: Aabb,
    /// Triangle number in the input mesh; its indices start at `3 * original_index`.
    pub original_index: usize,
}

impl BuildTriangle {
    #[must_use]
    pub fn new([a, b, c]: [Vec3; 3], original_index: usize) -> Self {
        Self {
            centroid: (a + b + c) / 3.0,
            aabb: Aabb::from_points(a, b, c),
            original_index,
        }
    }
}

/// Output triangle, in the order the leaf ranges address.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub pos_a: Vec3,
    pub pos_b: Vec3,
    pub pos_c: Vec3,

    pub normal_a: Vec3,
    pub normal_b: Vec3,
    pub normal_c: Vec3,
}

const _: () = assert!(size_of::<Triangle>() == 72);

impl Triangle {
    #[must_use]
    pub const fn new(positions: [Vec3; 3], normals: [Vec3; 3]) -> Self {
        let [pos_a, pos_b, pos_c] = positions;
        let [normal_a, normal_b, normal_c] = normals;
        Self {
            pos_a,
            pos_b,
            pos_c,
            normal_a,
            normal_b,
            normal_c,
        }
    }

    #[must_use]
    pub const fn positions(&self) -> [Vec3; 3] {
        [self.pos_a, self.pos_b, self.pos_c]
    }

    #[must_use]
    pub const fn normals(&self) -> [Vec3; 3] {
        [self.normal_a, self.normal_b, self.normal_c]
    }

    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        (self.pos_a + self.pos_b + self.pos_c) / 3.0
    }

    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.pos_a, self.pos_b, self.pos_c)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::{BuildTriangle, Triangle};

    #[test]
    fn build_triangle_summarises_corners() {
        let corners = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 1.5),
        ];
        let tri = BuildTriangle::new(corners, 4);

        assert_eq!(tri.centroid, Vec3::new(1.0, 1.0, 0.5));
        assert_eq!(tri.aabb.min, Vec3::ZERO);
        assert_eq!(tri.aabb.max, Vec3::new(3.0, 3.0, 1.5));
        assert_eq!(tri.original_index, 4);
    }

    #[test]
    fn output_triangle_matches_build_summary() {
        let corners = [Vec3::X, Vec3::Y, Vec3::Z];
        let tri = Triangle::new(corners, [Vec3::Z; 3]);
        let build = BuildTriangle::new(corners, 0);

        assert_eq!(tri.centroid(), build.centroid);
        assert_eq!(tri.aabb(), build.aabb);
        assert_eq!(tri.normals(), [Vec3::Z; 3]);
    }

    #[test]
    fn triangle_is_gpu_sized() {
        assert_eq!(size_of::<Triangle>(), 72);
    }
}
