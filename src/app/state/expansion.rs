use super::catalog::NodeKey;
use std::collections::HashSet;

/// Expanded catalog nodes, keyed by identity rather than by tree instance so
/// the set outlives catalog reloads.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashSet<NodeKey>,
}

impl ExpansionState {
    /// Flip one node. Returns the new state.
    pub fn toggle(&mut self, key: &NodeKey) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.clone());
            true
        }
    }

    pub fn is_expanded(&self, key: &NodeKey) -> bool {
        self.expanded.contains(key)
    }
}
