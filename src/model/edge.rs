//! Directed edge between two maze nodes.

use serde::{Deserialize, Serialize};
use super::NodeId;

/// A directed connection `src -> dst` with a traversal length.
///
/// Edges are owned by the maze and never mutated once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub src: NodeId,
    pub dst: NodeId,
    pub length: u32,
}

impl Edge {
    pub fn new(src: NodeId, dst: NodeId, length: u32) -> Self {
        Self { src, dst, length }
    }
}

/// Total length of a sequence of edges.
pub fn route_length(route: &[Edge]) -> u64 {
    route.iter().map(|e| u64::from(e.length)).sum()
}
