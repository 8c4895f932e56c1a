use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};
use geometry::aabb::Aabb;

/// A node as laid out in the flat node array.
///
/// `triangle_count == -1` marks an internal node whose left child lives at
/// `start_index` and whose right child lives at `start_index + 1`.
/// Otherwise the node is a leaf owning `triangle_count` triangles starting at
/// `start_index`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BvhNode {
    pub aabb: Aabb, // f32 * 6 = 24 bytes

    pub start_index: i32,
    pub triangle_count: i32,
}

const _: () = assert!(size_of::<BvhNode>() == 32);

/// Decoded view of a [`BvhNode`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Appended but not yet promoted; never present in a finished tree.
    Pending,
    Internal { left: usize, right: usize },
    Leaf { start: usize, count: usize },
}

impl BvhNode {
    pub const INTERNAL: i32 = -1;

    #[must_use]
    pub const fn pending(aabb: Aabb) -> Self {
        Self {
            aabb,
            start_index: -1,
            triangle_count: Self::INTERNAL,
        }
    }

    #[must_use]
    pub const fn leaf(aabb: Aabb, start: usize, count: usize) -> Self {
        Self {
            aabb,
            start_index: to_i32(start),
            triangle_count: to_i32(count),
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.triangle_count >= 0
    }

    #[must_use]
    #[expect(clippy::cast_sign_loss, reason = "both fields are checked non-negative first")]
    pub const fn kind(&self) -> NodeKind {
        if self.triangle_count >= 0 {
            NodeKind::Leaf {
                start: self.start_index as usize,
                count: self.triangle_count as usize,
            }
        } else if self.start_index < 0 {
            NodeKind::Pending
        } else {
            let left = self.start_index as usize;
            NodeKind::Internal {
                left,
                right: left + 1,
            }
        }
    }

    pub(crate) const fn promote_to_internal(&mut self, left: usize) {
        self.start_index = to_i32(left);
        self.triangle_count = Self::INTERNAL;
    }

    pub(crate) const fn promote_to_leaf(&mut self, start: usize, count: usize) {
        self.start_index = to_i32(start);
        self.triangle_count = to_i32(count);
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "`Mesh::new` caps the triangle count so every node and triangle index fits"
)]
const fn to_i32(value: usize) -> i32 {
    value as i32
}

/// Append-only node arena. Indices returned by [`NodeStore::append`] stay valid
/// for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct NodeStore {
    nodes: Vec<BvhNode>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl NodeStore {
    pub const DEFAULT_CAPACITY: usize = 256;
    /// Upper bound for the up-front reservation; the store still grows past it.
    pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

    /// Reserves `capacity` slots, clamped to `1..=MAX_INITIAL_CAPACITY`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity.clamp(1, Self::MAX_INITIAL_CAPACITY)),
        }
    }

    /// Stores `node` in the next free slot, doubling the backing storage when
    /// it is full, and returns the slot index.
    pub fn append(&mut self, node: BvhNode) -> usize {
        let capacity = self.nodes.capacity();
        if self.nodes.len() == capacity {
            self.nodes.reserve_exact(capacity.max(1));
        }

        let idx = self.nodes.len();
        self.nodes.push(node);
        idx
    }

    /// Appends both children of a split back to back and returns the index of
    /// the left one. The right child is always at `left + 1`.
    pub fn append_pair(&mut self, left: BvhNode, right: BvhNode) -> usize {
        let left_idx = self.append(left);
        let right_idx = self.append(right);

        debug_assert_eq!(right_idx, left_idx + 1);

        left_idx
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&BvhNode> {
        self.nodes.get(idx)
    }

    /// Hands out the used slots, dropping the spare capacity.
    #[must_use]
    pub fn into_nodes(mut self) -> Vec<BvhNode> {
        self.nodes.shrink_to_fit();
        self.nodes
    }
}

impl Index<usize> for NodeStore {
    type Output = BvhNode;

    fn index(&self, index: usize) -> &Self::Output {
        &self.nodes[index]
    }
}

impl IndexMut<usize> for NodeStore {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}
