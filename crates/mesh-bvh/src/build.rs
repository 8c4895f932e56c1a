use std::time::Instant;

use geometry::bounding_box::BoundingBox;
use tracing::{debug, trace};

use crate::{
    MeshBvh,
    config::BuildConfig,
    mesh::Mesh,
    node::{BvhNode, NodeStore},
    split::{choose_split, is_left, node_cost},
    stats::BuildStats,
    triangle::{BuildTriangle, Triangle},
};

impl MeshBvh {
    /// Builds with [`BuildConfig::default`].
    #[must_use]
    pub fn build(mesh: Mesh<'_>) -> Self {
        Self::build_with(mesh, &BuildConfig::default())
    }

    #[tracing::instrument(skip_all, fields(triangles = mesh.triangle_count()))]
    #[must_use]
    pub fn build_with(mesh: Mesh<'_>, config: &BuildConfig) -> Self {
        let start = Instant::now();

        let mut bounds = BoundingBox::EMPTY;
        let mut build_triangles: Vec<BuildTriangle> = (0..mesh.triangle_count())
            .map(|idx| {
                let tri = BuildTriangle::new(mesh.triangle_positions(idx), idx);
                bounds.grow_to_include_aabb(&tri.aabb);
                tri
            })
            .collect();

        let mut nodes = NodeStore::with_capacity(config.effective_initial_node_capacity());
        let root = nodes.append(BvhNode::pending(bounds.aabb()));

        let mut builder = Builder {
            triangles: &mut build_triangles,
            nodes,
            stats: BuildStats::default(),
            max_depth: config.effective_max_depth() as usize,
            splits_per_axis: config.effective_splits_per_axis(),
        };

        let len = builder.triangles.len();
        builder.split(root, 0, len, 0);

        let Builder { nodes, stats, .. } = builder;

        // leaf ranges index the working buffer, so emitting in its order makes
        // them index the output directly
        let triangles = build_triangles
            .iter()
            .map(|tri| {
                Triangle::new(
                    mesh.triangle_positions(tri.original_index),
                    mesh.triangle_normals(tri.original_index),
                )
            })
            .collect();

        let stats = BuildStats {
            build_time: start.elapsed(),
            ..stats
        };

        debug!(
            nodes = stats.total_node_count,
            leaves = stats.leaf_node_count,
            max_depth = stats.leaf_depth_max,
            elapsed = ?stats.build_time,
            "built bvh"
        );

        Self {
            nodes: nodes.into_nodes(),
            triangles,
            stats,
        }
    }
}

struct Builder<'a> {
    triangles: &'a mut [BuildTriangle],
    nodes: NodeStore,
    stats: BuildStats,
    max_depth: usize,
    splits_per_axis: u32,
}

impl Builder<'_> {
    fn split(&mut self, node_idx: usize, start: usize, count: usize, depth: usize) {
        let bounds = self.nodes[node_idx].aabb;
        let range = start..start + count;

        let parent_cost = node_cost(bounds.lens(), count);
        let best = choose_split(&bounds, &self.triangles[range.clone()], self.splits_per_axis);

        let cheaper = best.cost < parent_cost;

        if !cheaper || depth >= self.max_depth {
            if cheaper {
                trace!(depth, count, "depth limit reached");
            }

            self.nodes[node_idx].promote_to_leaf(start, count);
            self.stats.record_leaf(depth, count);
            return;
        }

        let mut bounds_left = BoundingBox::EMPTY;
        let mut bounds_right = BoundingBox::EMPTY;
        let mut num_left = 0;

        for idx in range {
            let tri = self.triangles[idx];
            if is_left(&tri, best.axis, best.position) {
                bounds_left.grow_to_include_aabb(&tri.aabb);
                self.triangles.swap(start + num_left, idx);
                num_left += 1;
            } else {
                bounds_right.grow_to_include_aabb(&tri.aabb);
            }
        }

        let num_right = count - num_left;

        let left = self.nodes.append_pair(
            BvhNode::pending(bounds_left.aabb()),
            BvhNode::pending(bounds_right.aabb()),
        );

        self.nodes[node_idx].promote_to_internal(left);
        self.stats.record_internal();

        self.split(left, start, num_left, depth + 1);
        self.split(left + 1, start + num_left, num_right, depth + 1);
    }
}
