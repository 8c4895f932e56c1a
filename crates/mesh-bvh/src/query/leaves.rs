use arrayvec::ArrayVec;
use geometry::aabb::Aabb;

use crate::{MeshBvh, NodeKind, Triangle};

/// A leaf reached during a depth-first walk.
#[derive(Debug, Copy, Clone)]
pub struct LeafRef<'a> {
    pub node_index: usize,
    pub depth: usize,
    pub bounds: Aabb,
    /// Offset of `triangles` within [`MeshBvh::triangles`].
    pub start: usize,
    pub triangles: &'a [Triangle],
}

impl MeshBvh {
    /// Every leaf, left subtree before right.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self)
    }
}

pub struct Leaves<'a> {
    bvh: &'a MeshBvh,
    // (node index, depth); at most one pending right sibling per level
    stack: ArrayVec<(usize, usize), 64>,
}

impl<'a> Leaves<'a> {
    fn new(bvh: &'a MeshBvh) -> Self {
        let mut stack = ArrayVec::new();
        if !bvh.nodes.is_empty() {
            stack.push((0, 0));
        }

        Self { bvh, stack }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = LeafRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node_index, depth) = self.stack.pop()?;
            let node = &self.bvh.nodes[node_index];

            match node.kind() {
                NodeKind::Internal { left, right } => {
                    self.stack.push((right, depth + 1));
                    self.stack.push((left, depth + 1));
                }
                NodeKind::Leaf { start, count } => {
                    return Some(LeafRef {
                        node_index,
                        depth,
                        bounds: node.aabb,
                        start,
                        triangles: &self.bvh.triangles[start..start + count],
                    });
                }
                // unreachable in a finished tree
                NodeKind::Pending => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{MeshBvh, shapes};

    #[test]
    fn walk_covers_every_triangle_once() {
        let data = shapes::cube_grid(3, 2.0);
        let bvh = MeshBvh::build(data.as_mesh().unwrap());

        let mut next_start = 0;
        let mut leaves = bvh.leaves().collect::<Vec<_>>();
        leaves.sort_by_key(|leaf| leaf.start);

        for leaf in &leaves {
            assert_eq!(leaf.start, next_start, "leaf ranges must tile the buffer");
            next_start += leaf.triangles.len();
        }

        assert_eq!(next_start, bvh.triangles().len());
        assert_eq!(leaves.len(), bvh.stats().leaf_node_count);
    }

    #[test]
    fn walk_reports_depths_matching_stats() {
        let data = shapes::cube_grid(4, 1.5);
        let bvh = MeshBvh::build(data.as_mesh().unwrap());

        let max = bvh.leaves().map(|leaf| leaf.depth).max().unwrap();
        let min = bvh.leaves().map(|leaf| leaf.depth).min().unwrap();
        let sum: usize = bvh.leaves().map(|leaf| leaf.depth).sum();

        assert_eq!(max, bvh.stats().leaf_depth_max);
        assert_eq!(min, bvh.stats().leaf_depth_min);
        assert_eq!(sum, bvh.stats().leaf_depth_sum);
    }
}
