use arrayvec::ArrayVec;
use geometry::aabb::Aabb;

use crate::{MeshBvh, NodeKind, Triangle};

impl MeshBvh {
    /// Triangles whose bounds touch `target`, skipping subtrees whose node box
    /// does not.
    #[must_use]
    pub fn range(&self, target: Aabb) -> RangeIter<'_> {
        RangeIter::new(self, target)
    }
}

pub struct RangeIter<'a> {
    bvh: &'a MeshBvh,
    target: Aabb,
    stack: ArrayVec<usize, 64>,
    current_leaf: Option<(&'a [Triangle], usize)>,
}

impl<'a> RangeIter<'a> {
    fn new(bvh: &'a MeshBvh, target: Aabb) -> Self {
        let mut stack = ArrayVec::new();
        if bvh.nodes.first().is_some_and(|root| root.aabb.collides(&target)) {
            stack.push(0);
        }

        Self {
            bvh,
            target,
            stack,
            current_leaf: None,
        }
    }
}

impl<'a> Iterator for RangeIter<'a> {
    type Item = &'a Triangle;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((leaf, index)) = self.current_leaf {
                if let Some(tri) = leaf.get(index) {
                    self.current_leaf = Some((leaf, index + 1));

                    if tri.aabb().collides(&self.target) {
                        return Some(tri);
                    }
                    continue;
                }

                self.current_leaf = None;
            }

            let node_index = self.stack.pop()?;
            match self.bvh.nodes[node_index].kind() {
                NodeKind::Internal { left, right } => {
                    for child in [right, left] {
                        if self.bvh.nodes[child].aabb.collides(&self.target) {
                            self.stack.push(child);
                        }
                    }
                }
                NodeKind::Leaf { start, count } => {
                    self.current_leaf = Some((&self.bvh.triangles[start..start + count], 0));
                }
                NodeKind::Pending => {}
            }
        }
    }
}
