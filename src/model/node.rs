//! Node in the maze.

use serde::{Deserialize, Serialize};

/// Opaque node identifier, stable for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// A location in the maze together with its collectible value.
///
/// `value` is what can still be picked up; `base_value` is what the node
/// started with. The environment zeroes `value` on collection and never
/// touches `base_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub base_value: u32,
}

impl Node {
    /// A node with nothing to collect.
    pub fn new(id: NodeId) -> Self {
        Self { id, value: 0, base_value: 0 }
    }

    /// Attach a collectible value. Sets both the current and base value.
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self.base_value = value;
        self
    }

    pub fn has_value(&self) -> bool {
        self.value > 0
    }

    /// Zero the current value, returning what was there.
    pub(crate) fn take_value(&mut self) -> u32 {
        std::mem::take(&mut self.value)
    }
}
