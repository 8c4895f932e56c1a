//! Tuning knobs for [`MeshBvh::build_with`](crate::MeshBvh::build_with).

use serde::{Deserialize, Serialize};

use crate::node::NodeStore;

/// Deepest tree the leaf walker can handle with its fixed stack.
pub const MAX_DEPTH_LIMIT: u32 = 62;
/// Most candidate planes tested per axis and node.
pub const MAX_SPLITS_PER_AXIS: u32 = 64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct BuildConfig {
    /// Nodes at this depth become leaves regardless of cost. Clamped to
    /// [`MAX_DEPTH_LIMIT`].
    pub max_depth: u32,
    /// Candidate split planes per axis, evenly spaced strictly inside the node
    /// bounds. Zero disables splitting. Clamped to [`MAX_SPLITS_PER_AXIS`].
    pub splits_per_axis: u32,
    /// Clamped to [`NodeStore::MAX_INITIAL_CAPACITY`].
    pub initial_node_capacity: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            splits_per_axis: 5,
            initial_node_capacity: 256,
        }
    }
}

impl BuildConfig {
    #[must_use]
    pub fn effective_max_depth(&self) -> u32 {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }

    #[must_use]
    pub fn effective_splits_per_axis(&self) -> u32 {
        self.splits_per_axis.min(MAX_SPLITS_PER_AXIS)
    }

    #[must_use]
    pub fn effective_initial_node_capacity(&self) -> usize {
        self.initial_node_capacity
            .clamp(1, NodeStore::MAX_INITIAL_CAPACITY)
    }
}
