use glam::{Mat4, Vec3};
use thiserror::Error;

/// Largest triangle count whose node and triangle indices fit the `i32`
/// fields of [`BvhNode`](crate::BvhNode).
pub const MAX_TRIANGLES: usize = (i32::MAX as usize) / 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("index buffer length {len} is not a multiple of 3")]
    IndexCountNotMultipleOfThree { len: usize },

    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        index: u32,
        position: usize,
        vertex_count: usize,
    },

    #[error("{normals} normals given for {positions} vertex positions")]
    NormalCountMismatch { positions: usize, normals: usize },

    #[error("{triangles} triangles exceeds the supported maximum of {max}", max = MAX_TRIANGLES)]
    TooManyTriangles { triangles: usize },
}

/// Borrowed, validated triangle soup: world-space positions, a flat index
/// buffer with three entries per triangle, and one normal per position.
#[derive(Debug, Copy, Clone)]
pub struct Mesh<'a> {
    positions: &'a [Vec3],
    indices: &'a [u32],
    normals: &'a [Vec3],
}

impl<'a> Mesh<'a> {
    pub fn new(
        positions: &'a [Vec3],
        indices: &'a [u32],
        normals: &'a [Vec3],
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotMultipleOfThree { len: indices.len() });
        }

        if normals.len() != positions.len() {
            return Err(MeshError::NormalCountMismatch {
                positions: positions.len(),
                normals: normals.len(),
            });
        }

        let triangles = indices.len() / 3;
        if triangles > MAX_TRIANGLES {
            return Err(MeshError::TooManyTriangles { triangles });
        }

        let vertex_count = positions.len();
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            });
        }

        Ok(Self {
            positions,
            indices,
            normals,
        })
    }

    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub const fn positions(&self) -> &'a [Vec3] {
        self.positions
    }

    #[must_use]
    pub const fn indices(&self) -> &'a [u32] {
        self.indices
    }

    #[must_use]
    pub const fn normals(&self) -> &'a [Vec3] {
        self.normals
    }

    fn corner_indices(&self, triangle: usize) -> [usize; 3] {
        let base = triangle * 3;
        [
            self.indices[base] as usize,
            self.indices[base + 1] as usize,
            self.indices[base + 2] as usize,
        ]
    }

    /// Corner positions of triangle number `triangle`.
    #[must_use]
    pub fn triangle_positions(&self, triangle: usize) -> [Vec3; 3] {
        self.corner_indices(triangle).map(|idx| self.positions[idx])
    }

    #[must_use]
    pub fn triangle_normals(&self, triangle: usize) -> [Vec3; 3] {
        self.corner_indices(triangle).map(|idx| self.normals[idx])
    }
}

/// Owned triangle soup, e.g. one imported object before it is placed in a
/// scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
}

impl MeshData {
    pub fn as_mesh(&self) -> Result<Mesh<'_>, MeshError> {
        Mesh::new(&self.positions, &self.indices, &self.normals)
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "vertex counts above u32::MAX cannot be addressed by the index buffer"
    )]
    /// Index the next pushed position will have.
    #[must_use]
    pub fn next_index(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Appends `other` unchanged, rebasing its indices past the vertices
    /// already held.
    pub fn append(&mut self, other: &Self) {
        let base = self.next_index();

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&idx| idx + base));
    }

    /// Appends `other` after moving it by `transform`. Normals go through the
    /// linear part of the transform and are renormalised.
    pub fn append_transformed(&mut self, other: &Self, transform: &Mat4) {
        let base = self.next_index();

        self.positions.extend(
            other
                .positions
                .iter()
                .map(|&p| transform.transform_point3(p)),
        );
        self.normals.extend(
            other
                .normals
                .iter()
                .map(|&n| transform.transform_vector3(n).normalize_or_zero()),
        );
        self.indices
            .extend(other.indices.iter().map(|&idx| idx + base));
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::{Mesh, MeshData, MeshError};

    const POSITIONS: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];
    const NORMALS: [Vec3; 3] = [Vec3::Z; 3];

    #[test]
    fn accepts_well_formed_soup() {
        let indices = [0, 1, 2, 2, 1, 0];
        let mesh = Mesh::new(&POSITIONS, &indices, &NORMALS).unwrap();

        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangle_positions(1), [Vec3::Z, Vec3::Y, Vec3::X]);
        assert_eq!(mesh.triangle_normals(0), [Vec3::Z; 3]);
    }

    #[test]
    fn accepts_empty_soup() {
        let mesh = Mesh::new(&[], &[], &[]).unwrap();
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn rejects_partial_triangles() {
        let err = Mesh::new(&POSITIONS, &[0, 1], &NORMALS).unwrap_err();
        assert_eq!(err, MeshError::IndexCountNotMultipleOfThree { len: 2 });
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let err = Mesh::new(&POSITIONS, &[0, 1, 2, 0, 3, 1], &NORMALS).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                index: 3,
                position: 4,
                vertex_count: 3,
            }
        );
    }

    #[test]
    fn rejects_missing_normals() {
        let err = Mesh::new(&POSITIONS, &[0, 1, 2], &NORMALS[..2]).unwrap_err();
        assert_eq!(
            err,
            MeshError::NormalCountMismatch {
                positions: 3,
                normals: 2,
            }
        );
    }

    #[test]
    fn errors_render_readably() {
        let err = MeshError::IndexCountNotMultipleOfThree { len: 7 };
        assert_eq!(err.to_string(), "index buffer length 7 is not a multiple of 3");
    }

    #[test]
    fn append_rebases_indices() {
        let tri = MeshData {
            positions: POSITIONS.to_vec(),
            indices: vec![0, 1, 2],
            normals: NORMALS.to_vec(),
        };

        let mut soup = MeshData::default();
        soup.append(&tri);
        soup.append_transformed(&tri, &Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));

        assert_eq!(soup.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(soup.positions[3], Vec3::new(1.0, 0.0, 5.0));
        assert_eq!(soup.normals[5], Vec3::Z);
        assert_eq!(soup.as_mesh().unwrap().triangle_count(), 2);
    }

    #[test]
    fn transformed_normals_stay_unit_length() {
        let tri = MeshData {
            positions: POSITIONS.to_vec(),
            indices: vec![0, 1, 2],
            normals: NORMALS.to_vec(),
        };

        let mut soup = MeshData::default();
        soup.append_transformed(&tri, &Mat4::from_scale(Vec3::splat(4.0)));

        for normal in &soup.normals {
            assert!((normal.length() - 1.0).abs() < 1e-6);
        }
    }
}
