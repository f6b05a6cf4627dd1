use crate::traversal::context::NodeFailure;

/// Outcome of one traversal run
#[derive(Debug, Clone, Default)]
pub struct TraversalReport {
    /// Pages handed to the sink
    pub pages_written: usize,

    /// Deepest level at which a page was written
    pub deepest_level: u32,

    /// Nodes that could not be fetched, in discovery order
    pub failures: Vec<NodeFailure>,
}

impl TraversalReport {
    pub(crate) fn record_page(&mut self, depth: u32) {
        self.pages_written += 1;
        self.deepest_level = self.deepest_level.max(depth);
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
