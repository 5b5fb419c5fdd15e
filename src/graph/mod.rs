//! # Weighted Graph Traits
//!
//! This is the contract between the shortest-path engine and whatever holds
//! the graph. The engine only ever asks three things: which edges leave a
//! vertex, where an edge starts and ends, and how long it is.
//!
//! ## Implementations
//!
//! | Graph | Module | Description |
//! |-------|--------|-------------|
//! | `Maze` | `maze` | Insertion-ordered maze snapshot with value payloads |
//! | `Reversed<G>` | here | Transpose view of any `ReversibleGraph` |
//! | `&G` | here | Borrowed graphs, so several engines can share one snapshot |
//!
//! Weights must be nonnegative. Nothing here checks that; the engine's
//! results are meaningless otherwise.

pub mod maze;

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

pub use maze::Maze;

/// Outgoing or incoming edges of one vertex. Mazes rarely exceed four.
pub type EdgeList<E> = SmallVec<[E; 4]>;

// ============================================================================
// Traits
// ============================================================================

/// Read-only directed graph with nonnegative edge weights.
pub trait WeightedGraph {
    type Vertex: Clone + Eq + Hash + Debug;
    type Edge: Clone + Debug;

    /// Edges leaving `vertex`. Unknown vertices have none.
    fn outgoing_edges(&self, vertex: &Self::Vertex) -> EdgeList<Self::Edge>;

    /// Start of `edge`.
    fn source(&self, edge: &Self::Edge) -> Self::Vertex;

    /// End of `edge`.
    fn dest(&self, edge: &Self::Edge) -> Self::Vertex;

    /// Length of `edge`, always `>= 0`.
    fn weight(&self, edge: &Self::Edge) -> f64;
}

/// A graph that can also enumerate the edges entering a vertex.
pub trait ReversibleGraph: WeightedGraph {
    /// Edges whose `dest` is `vertex`.
    fn incoming_edges(&self, vertex: &Self::Vertex) -> EdgeList<Self::Edge>;
}

impl<G: WeightedGraph + ?Sized> WeightedGraph for &G {
    type Vertex = G::Vertex;
    type Edge = G::Edge;

    fn outgoing_edges(&self, vertex: &Self::Vertex) -> EdgeList<Self::Edge> {
        (**self).outgoing_edges(vertex)
    }

    fn source(&self, edge: &Self::Edge) -> Self::Vertex {
        (**self).source(edge)
    }

    fn dest(&self, edge: &Self::Edge) -> Self::Vertex {
        (**self).dest(edge)
    }

    fn weight(&self, edge: &Self::Edge) -> f64 {
        (**self).weight(edge)
    }
}

impl<G: ReversibleGraph + ?Sized> ReversibleGraph for &G {
    fn incoming_edges(&self, vertex: &Self::Vertex) -> EdgeList<Self::Edge> {
        (**self).incoming_edges(vertex)
    }
}

// ============================================================================
// Reversed
// ============================================================================

/// Transpose of a graph: every edge `u -> v` is walked as `v -> u`.
///
/// Running the engine from `t` on `Reversed(g)` gives, for every vertex `v`,
/// the shortest distance from `v` to `t` in `g`. Edge values are the
/// original edges, so reconstructed paths list them in reverse travel order.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<G>(pub G);

impl<G: ReversibleGraph> WeightedGraph for Reversed<G> {
    type Vertex = G::Vertex;
    type Edge = G::Edge;

    fn outgoing_edges(&self, vertex: &Self::Vertex) -> EdgeList<Self::Edge> {
        self.0.incoming_edges(vertex)
    }

    fn source(&self, edge: &Self::Edge) -> Self::Vertex {
        self.0.dest(edge)
    }

    fn dest(&self, edge: &Self::Edge) -> Self::Vertex {
        self.0.source(edge)
    }

    fn weight(&self, edge: &Self::Edge) -> f64 {
        self.0.weight(edge)
    }
}

impl<G: ReversibleGraph> ReversibleGraph for Reversed<G> {
    fn incoming_edges(&self, vertex: &Self::Vertex) -> EdgeList<Self::Edge> {
        self.0.outgoing_edges(vertex)
    }
}
