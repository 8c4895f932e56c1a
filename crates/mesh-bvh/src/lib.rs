//! Binary BVH over a triangle soup, flattened for GPU upload.
//!
//! The tree is stored as one array of [`BvhNode`]s (root at index 0) and one
//! array of [`Triangle`]s. Leaves address contiguous ranges of the triangle
//! array directly, and the right child of an internal node always follows its
//! left child, so neither array needs pointers or an indirection table.

use std::fmt::{Debug, Formatter};

use geometry::aabb::Aabb;
use glam::Vec3;

mod build;
pub mod config;
pub mod mesh;
pub mod node;
pub mod query;
pub mod scene;
pub mod shapes;
pub mod split;
pub mod stats;
pub mod triangle;

pub use config::BuildConfig;
pub use mesh::{Mesh, MeshData, MeshError};
pub use node::{BvhNode, NodeKind};
pub use query::leaves::LeafRef;
pub use scene::{ObjectId, Scene, SceneObject};
pub use stats::BuildStats;
pub use triangle::Triangle;

#[derive(Clone)]
pub struct MeshBvh {
    nodes: Vec<BvhNode>,
    triangles: Vec<Triangle>,
    stats: BuildStats,
}

impl Debug for MeshBvh {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshBvh")
            .field("nodes", &self.nodes.len())
            .field("triangles", &self.triangles.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl MeshBvh {
    /// Validates the soup and builds with the default configuration.
    pub fn construct(
        positions: &[Vec3],
        indices: &[u32],
        normals: &[Vec3],
    ) -> Result<Self, MeshError> {
        let mesh = Mesh::new(positions, indices, normals)?;
        Ok(Self::build(mesh))
    }

    /// Node array; index 0 is the root.
    #[must_use]
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Triangles in the order leaf ranges address them.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[must_use]
    pub const fn stats(&self) -> &BuildStats {
        &self.stats
    }

    #[must_use]
    pub fn root(&self) -> &BvhNode {
        &self.nodes[0]
    }

    #[must_use]
    pub fn root_bounds(&self) -> Aabb {
        self.root().aabb
    }

    /// Node array as raw bytes, 32 bytes per node.
    #[must_use]
    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    /// Triangle array as raw bytes, 72 bytes per triangle.
    #[must_use]
    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<BvhNode>, Vec<Triangle>, BuildStats) {
        (self.nodes, self.triangles, self.stats)
    }
}
