//! Procedural test geometry.

use glam::Vec3;

use crate::mesh::MeshData;

/// Axis-aligned cube with flat-shaded faces: 24 vertices and 12 triangles.
#[must_use]
pub fn cube(min: Vec3, size: f32) -> MeshData {
    // (normal, two in-plane axes) per face; corners are wound counter-clockwise
    // seen from outside
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let half = size / 2.0;
    let center = min + Vec3::splat(half);

    let mut mesh = MeshData::default();
    for (normal, u, v) in FACES {
        let base = mesh.next_index();
        let face_center = center + normal * half;

        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.positions.push(face_center + u * (su * half) + v * (sv * half));
            mesh.normals.push(normal);
        }

        mesh.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

/// `n * n * n` unit cubes whose minimum corners sit `spacing` apart.
#[must_use]
pub fn cube_grid(n: usize, spacing: f32) -> MeshData {
    let mut mesh = MeshData::default();

    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let min = Vec3::new(x as f32, y as f32, z as f32) * spacing;
                mesh.append(&cube(min, 1.0));
            }
        }
    }

    mesh
}

/// `count` independent small triangles scattered through `[0, width)^3`,
/// drawn from the global `fastrand` generator (seed it for repeatability).
#[must_use]
pub fn random_soup(count: usize, width: f32) -> MeshData {
    let mut mesh = MeshData::default();

    for _ in 0..count {
        let origin = Vec3::from_array(std::array::from_fn(|_| fastrand::f32() * width));
        let base = mesh.next_index();

        let corners: [Vec3; 3] = std::array::from_fn(|_| {
            origin + Vec3::from_array(std::array::from_fn(|_| fastrand::f32()))
        });
        let [a, b, c] = corners;
        let normal = (b - a).cross(c - a).normalize_or_zero();

        mesh.positions.extend(corners);
        mesh.normals.extend([normal; 3]);
        mesh.indices.extend([base, base + 1, base + 2]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use geometry::aabb::Aabb;
    use glam::Vec3;

    use super::{cube, cube_grid, random_soup};

    #[test]
    fn cube_spans_its_bounds() {
        let mesh = cube(Vec3::new(1.0, 2.0, 3.0), 2.0);

        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.positions.len(), 24);

        let bounds: Aabb = mesh
            .positions
            .iter()
            .map(|&p| Aabb::new(p, p))
            .collect();
        assert_eq!(bounds, Aabb::new((1.0, 2.0, 3.0), (3.0, 4.0, 5.0)));
    }

    #[test]
    fn cube_faces_point_outwards() {
        let mesh = cube(Vec3::ZERO, 1.0);

        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|i| mesh.positions[tri[i] as usize]);
            let winding = (b - a).cross(c - a).normalize();
            assert!(winding.abs_diff_eq(mesh.normals[tri[0] as usize], 1e-6));
        }
    }

    #[test]
    fn grid_has_twelve_triangles_per_cube() {
        assert_eq!(cube_grid(3, 2.0).triangle_count(), 27 * 12);
        assert_eq!(cube_grid(0, 2.0).triangle_count(), 0);
    }

    #[test]
    fn soup_is_valid() {
        fastrand::seed(7);
        let mesh = random_soup(50, 10.0);

        assert_eq!(mesh.as_mesh().unwrap().triangle_count(), 50);
    }
}
