use std::{fmt::Display, time::Duration};

/// Aggregate counters over a finished tree, recorded as each node is
/// finalised.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub build_time: Duration,
    /// Sum of `triangle_count` over all leaves.
    pub triangle_count: usize,
    pub total_node_count: usize,
    pub leaf_node_count: usize,

    pub leaf_depth_max: usize,
    pub leaf_depth_min: usize,
    pub leaf_depth_sum: usize,

    pub leaf_max_triangles: usize,
    pub leaf_min_triangles: usize,
}

impl Default for BuildStats {
    fn default() -> Self {
        Self {
            build_time: Duration::ZERO,
            triangle_count: 0,
            total_node_count: 0,
            leaf_node_count: 0,
            leaf_depth_max: 0,
            leaf_depth_min: usize::MAX,
            leaf_depth_sum: 0,
            leaf_max_triangles: 0,
            leaf_min_triangles: usize::MAX,
        }
    }
}

impl BuildStats {
    pub fn record_internal(&mut self) {
        self.total_node_count += 1;
    }

    pub fn record_leaf(&mut self, depth: usize, triangle_count: usize) {
        self.total_node_count += 1;
        self.leaf_node_count += 1;

        self.leaf_depth_sum += depth;
        self.leaf_depth_max = self.leaf_depth_max.max(depth);
        self.leaf_depth_min = self.leaf_depth_min.min(depth);
        self.triangle_count += triangle_count;

        self.leaf_max_triangles = self.leaf_max_triangles.max(triangle_count);
        self.leaf_min_triangles = self.leaf_min_triangles.min(triangle_count);
    }

    #[must_use]
    pub const fn internal_node_count(&self) -> usize {
        self.total_node_count - self.leaf_node_count
    }

    /// Integer mean leaf depth, `0` before any leaf is recorded.
    #[must_use]
    pub fn leaf_depth_avg(&self) -> usize {
        self.leaf_depth_sum.checked_div(self.leaf_node_count).unwrap_or(0)
    }

    /// Integer mean triangles per leaf, `0` before any leaf is recorded.
    #[must_use]
    pub fn leaf_triangles_avg(&self) -> usize {
        self.triangle_count.checked_div(self.leaf_node_count).unwrap_or(0)
    }
}

impl Display for BuildStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Time: {}ms", self.build_time.as_millis())?;
        writeln!(f, "Total Triangles: {}", self.triangle_count)?;
        writeln!(f, "Total Nodes: {}", self.total_node_count)?;
        writeln!(f, "Leaf Nodes: {}", self.leaf_node_count)?;
        writeln!(f, "Leaf Depth:")?;
        writeln!(f, "Leaf Depth Max: {}", self.leaf_depth_max)?;
        writeln!(f, "Leaf Depth Min: {}", self.leaf_depth_min)?;
        writeln!(f, "Leaf Depth Avg: {}", self.leaf_depth_avg())?;
        writeln!(f, "Leaf Tris:")?;
        writeln!(f, "Leaf Max Triangles: {}", self.leaf_max_triangles)?;
        writeln!(f, "Leaf Min Triangles: {}", self.leaf_min_triangles)?;
        write!(f, "Leaf Avg Triangles: {}", self.leaf_triangles_avg())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::BuildStats;

    #[test]
    fn leaves_update_extrema() {
        let mut stats = BuildStats::default();
        stats.record_internal();
        stats.record_leaf(1, 4);
        stats.record_internal();
        stats.record_leaf(2, 1);
        stats.record_leaf(2, 3);

        assert_eq!(stats.total_node_count, 5);
        assert_eq!(stats.leaf_node_count, 3);
        assert_eq!(stats.internal_node_count(), 2);
        assert_eq!(stats.triangle_count, 8);
        assert_eq!(stats.leaf_depth_min, 1);
        assert_eq!(stats.leaf_depth_max, 2);
        assert_eq!(stats.leaf_depth_sum, 5);
        assert_eq!(stats.leaf_min_triangles, 1);
        assert_eq!(stats.leaf_max_triangles, 4);
        assert_eq!(stats.leaf_depth_avg(), 1);
        assert_eq!(stats.leaf_triangles_avg(), 2);
    }

    #[test]
    fn averages_survive_no_leaves() {
        let stats = BuildStats::default();
        assert_eq!(stats.leaf_depth_avg(), 0);
        assert_eq!(stats.leaf_triangles_avg(), 0);
    }

    #[test]
    fn report_lists_every_counter() {
        let mut stats = BuildStats {
            build_time: Duration::from_millis(12),
            ..BuildStats::default()
        };
        stats.record_leaf(0, 1);

        let report = stats.to_string();
        assert!(report.starts_with("Total Time: 12ms\n"));
        assert!(report.contains("Leaf Nodes: 1\n"));
        assert!(report.contains("Leaf Depth Min: 0\n"));
        assert!(report.ends_with("Leaf Avg Triangles: 1"));
    }
}
