//! Maze snapshot.
//!
//! The concrete graph both phases run on. Nodes keep insertion order so
//! every scan over them is deterministic, and adjacency is indexed both
//! ways so the maze can be walked forwards or transposed.
//!
//! ## Invariants
//!
//! - Node ids are unique.
//! - Every edge joins two nodes already in the maze.
//! - Every edge length is at least 1.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::*;
use crate::{Error, Result};
use super::{EdgeList, ReversibleGraph, WeightedGraph};

/// Full node/edge view of a maze.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "MazeLayout", into = "MazeLayout")]
pub struct Maze {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    outgoing: Vec<EdgeList<Edge>>,
    incoming: Vec<EdgeList<Edge>>,
}

/// Wire form: `{ "nodes": [...], "edges": [...] }`, edges directed.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MazeLayout {
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Maze {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Add a node. Fails if the id is taken.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.index.contains_key(&node.id) {
            return Err(Error::InvalidMaze(format!("duplicate node {}", node.id)));
        }
        self.index.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        self.outgoing.push(SmallVec::new());
        self.incoming.push(SmallVec::new());
        Ok(())
    }

    /// Add the directed edge `src -> dst`.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, length: u32) -> Result<Edge> {
        if length == 0 {
            return Err(Error::InvalidMaze(format!("edge {src} -> {dst} has zero length")));
        }
        let s = self.slot(src)
            .ok_or_else(|| Error::InvalidMaze(format!("edge source {src} is not a node")))?;
        let d = self.slot(dst)
            .ok_or_else(|| Error::InvalidMaze(format!("edge target {dst} is not a node")))?;

        let edge = Edge::new(src, dst, length);
        self.outgoing[s].push(edge);
        self.incoming[d].push(edge);
        Ok(edge)
    }

    /// Add `a -> b` and `b -> a` with the same length.
    pub fn connect(&mut self, a: NodeId, b: NodeId, length: u32) -> Result<()> {
        self.add_edge(a, b, length)?;
        if a != b {
            self.add_edge(b, a, length)?;
        }
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    fn slot(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slot(id).map(|s| &self.nodes[s])
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|edges| edges.len()).sum()
    }

    /// Edges leaving `id`, in the order they were added.
    pub fn exits(&self, id: NodeId) -> &[Edge] {
        match self.slot(id) {
            Some(s) => self.outgoing[s].as_slice(),
            None => &[],
        }
    }

    /// Ids reachable from `id` in one move, in edge order, without repeats.
    pub fn neighbors(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        let mut out: SmallVec<[NodeId; 4]> = SmallVec::new();
        for edge in self.exits(id) {
            if !out.contains(&edge.dst) {
                out.push(edge.dst);
            }
        }
        out
    }

    pub fn is_neighbor(&self, from: NodeId, to: NodeId) -> bool {
        self.exits(from).iter().any(|e| e.dst == to)
    }

    /// Shortest direct edge `from -> to`, if any.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<Edge> {
        self.exits(from)
            .iter()
            .filter(|e| e.dst == to)
            .min_by_key(|e| e.length)
            .copied()
    }

    /// Sum of the currently collectible value.
    pub fn total_value(&self) -> u64 {
        self.nodes.iter().map(|n| u64::from(n.value)).sum()
    }

    // ========================================================================
    // Mutation (environment only)
    // ========================================================================

    /// Zero the value at `id`, returning what was collected.
    pub fn collect(&mut self, id: NodeId) -> Result<u32> {
        let s = self.slot(id).ok_or_else(|| Error::NotFound(format!("Node {id}")))?;
        Ok(self.nodes[s].take_value())
    }
}

// ============================================================================
// Graph impls
// ============================================================================

impl WeightedGraph for Maze {
    type Vertex = NodeId;
    type Edge = Edge;

    fn outgoing_edges(&self, vertex: &NodeId) -> EdgeList<Edge> {
        self.slot(*vertex)
            .map(|s| self.outgoing[s].clone())
            .unwrap_or_default()
    }

    fn source(&self, edge: &Edge) -> NodeId {
        edge.src
    }

    fn dest(&self, edge: &Edge) -> NodeId {
        edge.dst
    }

    fn weight(&self, edge: &Edge) -> f64 {
        f64::from(edge.length)
    }
}

impl ReversibleGraph for Maze {
    fn incoming_edges(&self, vertex: &NodeId) -> EdgeList<Edge> {
        self.slot(*vertex)
            .map(|s| self.incoming[s].clone())
            .unwrap_or_default()
    }
}

// ============================================================================
// Serde bridge
// ============================================================================

impl TryFrom<MazeLayout> for Maze {
    type Error = Error;

    fn try_from(layout: MazeLayout) -> Result<Self> {
        let mut maze = Maze::new();
        for mut node in layout.nodes {
            // A layout that only gives `value` describes a fresh maze.
            if node.base_value == 0 {
                node.base_value = node.value;
            }
            maze.add_node(node)?;
        }
        for edge in layout.edges {
            maze.add_edge(edge.src, edge.dst, edge.length)?;
        }
        Ok(maze)
    }
}

impl From<Maze> for MazeLayout {
    fn from(maze: Maze) -> Self {
        let edges = maze.outgoing.iter().flatten().copied().collect();
        MazeLayout { nodes: maze.nodes, edges }
    }
}

// ============================================================================
// Tests
// ============================================================================
