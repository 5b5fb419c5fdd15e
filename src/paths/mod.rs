//! # Shortest Paths
//!
//! Single-source Dijkstra over any `WeightedGraph`, remembering the result
//! for one source at a time.
//!
//! ```text
//! single_source_distances(s) → distance table + predecessor-edge table
//!   distance(t)   → recorded length s..t
//!   best_path(t)  → edges s..t, following predecessors back from t
//! ```
//!
//! Each run rebuilds both tables from scratch. Callers that need two live
//! sources at once (the escape collector does) hold two engines.

use std::marker::PhantomData;

use hashbrown::HashMap;

use crate::graph::WeightedGraph;
use crate::queue::{IndexedHeap, PriorityQueue};
use crate::{Error, Result};

/// Dijkstra engine bound to one graph, answering queries for its last source.
///
/// `Q` is the frontier queue, rebuilt on every run.
pub struct ShortestPaths<G, Q = IndexedHeap<<G as WeightedGraph>::Vertex>>
where
    G: WeightedGraph,
{
    graph: G,
    source: Option<G::Vertex>,
    distances: HashMap<G::Vertex, f64>,
    best_edges: HashMap<G::Vertex, G::Edge>,
    frontier: PhantomData<fn() -> Q>,
}

impl<G: WeightedGraph> ShortestPaths<G> {
    /// Engine with the default heap frontier.
    pub fn new(graph: G) -> Self {
        Self::with_queue(graph)
    }
}

impl<G, Q> ShortestPaths<G, Q>
where
    G: WeightedGraph,
    Q: PriorityQueue<G::Vertex> + Default,
{
    /// Engine with a caller-chosen frontier queue.
    pub fn with_queue(graph: G) -> Self {
        Self {
            graph,
            source: None,
            distances: HashMap::new(),
            best_edges: HashMap::new(),
            frontier: PhantomData,
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Source of the most recent run, if any.
    pub fn source(&self) -> Option<&G::Vertex> {
        self.source.as_ref()
    }

    /// Compute shortest distances from `source` to everything it reaches.
    ///
    /// Discards the previous source's tables.
    pub fn single_source_distances(&mut self, source: G::Vertex) -> Result<()> {
        let mut frontier = Q::default();
        self.distances.clear();
        self.best_edges.clear();

        frontier.add(source.clone(), 0.0)?;
        self.distances.insert(source.clone(), 0.0);

        let mut settled = 0usize;
        while !frontier.is_empty() {
            let vertex = frontier.extract_min()?;
            settled += 1;
            let base = self.distances.get(&vertex).copied().unwrap_or(0.0);

            for edge in self.graph.outgoing_edges(&vertex) {
                let next = self.graph.dest(&edge);
                let candidate = base + self.graph.weight(&edge);
                match self.distances.get(&next).copied() {
                    None => {
                        self.distances.insert(next.clone(), candidate);
                        self.best_edges.insert(next.clone(), edge);
                        frontier.add(next, candidate)?;
                    }
                    Some(known) if candidate < known => {
                        // Relaxation
                        self.distances.insert(next.clone(), candidate);
                        self.best_edges.insert(next.clone(), edge);
                        frontier.change_priority(&next, candidate)?;
                    }
                    Some(_) => {}
                }
            }
        }

        tracing::trace!(?source, settled, "single-source distances computed");
        self.source = Some(source);
        Ok(())
    }

    fn require_source(&self) -> Result<&G::Vertex> {
        self.source.as_ref().ok_or(Error::NoSource)
    }

    /// Shortest distance from the current source to `target`.
    pub fn distance(&self, target: &G::Vertex) -> Result<f64> {
        let source = self.require_source()?;
        self.distances
            .get(target)
            .copied()
            .ok_or_else(|| Error::Unreachable(format!("{target:?} from {source:?}")))
    }

    pub fn is_reachable(&self, target: &G::Vertex) -> bool {
        self.distances.contains_key(target)
    }

    /// Edges of one shortest path from the current source to `target`, in
    /// travel order. Empty when `target` is the source.
    pub fn best_path(&self, target: &G::Vertex) -> Result<Vec<G::Edge>> {
        let source = self.require_source()?;
        if !self.distances.contains_key(target) {
            return Err(Error::Unreachable(format!("{target:?} from {source:?}")));
        }

        let mut path = Vec::new();
        let mut current = target.clone();
        while current != *source {
            let edge = self.best_edges.get(&current).ok_or_else(|| {
                Error::Unreachable(format!("{current:?} has no predecessor toward {source:?}"))
            })?;
            current = self.graph.source(edge);
            path.push(edge.clone());
        }
        path.reverse();
        Ok(path)
    }

    /// Summed weight of `path` under this engine's graph.
    pub fn path_weight(&self, path: &[G::Edge]) -> f64 {
        path.iter().map(|e| self.graph.weight(e)).sum()
    }

    /// Every vertex reached by the last run with its distance.
    pub fn reached(&self) -> impl Iterator<Item = (&G::Vertex, f64)> + '_ {
        self.distances.iter().map(|(v, d)| (v, *d))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Maze, Reversed};
    use crate::model::{Node, NodeId};
    use crate::queue::LinearQueue;

    /// 1 -> 2 (4), 1 -> 3 (1), 3 -> 2 (2), 2 -> 4 (1), 5 isolated.
    fn diamond() -> Maze {
        let mut maze = Maze::new();
        for id in 1..=5 {
            maze.add_node(Node::new(NodeId(id))).unwrap();
        }
        maze.add_edge(NodeId(1), NodeId(2), 4).unwrap();
        maze.add_edge(NodeId(1), NodeId(3), 1).unwrap();
        maze.add_edge(NodeId(3), NodeId(2), 2).unwrap();
        maze.add_edge(NodeId(2), NodeId(4), 1).unwrap();
        maze
    }

    #[test]
    fn test_queries_before_any_run_fail() {
        let maze = diamond();
        let engine = ShortestPaths::new(&maze);
        assert!(matches!(engine.distance(&NodeId(1)), Err(Error::NoSource)));
        assert!(matches!(engine.best_path(&NodeId(1)), Err(Error::NoSource)));
    }

    #[test]
    fn test_relaxation_finds_cheaper_route() {
        let maze = diamond();
        let mut engine = ShortestPaths::new(&maze);
        engine.single_source_distances(NodeId(1)).unwrap();

        assert_eq!(engine.distance(&NodeId(1)).unwrap(), 0.0);
        assert_eq!(engine.distance(&NodeId(2)).unwrap(), 3.0);
        assert_eq!(engine.distance(&NodeId(4)).unwrap(), 4.0);

        let path = engine.best_path(&NodeId(4)).unwrap();
        let hops: Vec<u64> = path.iter().map(|e| e.dst.0).collect();
        assert_eq!(hops, vec![3, 2, 4]);
        assert_eq!(engine.path_weight(&path), 4.0);
    }

    #[test]
    fn test_unreachable_target_fails_loudly() {
        let maze = diamond();
        let mut engine = ShortestPaths::new(&maze);
        engine.single_source_distances(NodeId(1)).unwrap();

        assert!(matches!(engine.distance(&NodeId(5)), Err(Error::Unreachable(_))));
        assert!(matches!(engine.best_path(&NodeId(5)), Err(Error::Unreachable(_))));
        assert!(!engine.is_reachable(&NodeId(5)));
    }

    #[test]
    fn test_path_to_source_is_empty() {
        let maze = diamond();
        let mut engine = ShortestPaths::new(&maze);
        engine.single_source_distances(NodeId(3)).unwrap();
        assert!(engine.best_path(&NodeId(3)).unwrap().is_empty());
    }

    #[test]
    fn test_rerooting_replaces_tables() {
        let maze = diamond();
        let mut engine = ShortestPaths::new(&maze);
        engine.single_source_distances(NodeId(1)).unwrap();
        engine.single_source_distances(NodeId(2)).unwrap();

        assert_eq!(engine.source(), Some(&NodeId(2)));
        assert!(!engine.is_reachable(&NodeId(1)));
        assert_eq!(engine.distance(&NodeId(4)).unwrap(), 1.0);
        assert_eq!(engine.reached().count(), 2);
    }

    #[test]
    fn test_reversed_gives_distance_to_target() {
        let maze = diamond();
        let mut to_four = ShortestPaths::new(Reversed(&maze));
        to_four.single_source_distances(NodeId(4)).unwrap();

        assert_eq!(to_four.distance(&NodeId(1)).unwrap(), 4.0);
        assert_eq!(to_four.distance(&NodeId(3)).unwrap(), 3.0);
        assert!(!to_four.is_reachable(&NodeId(5)));
    }

    #[test]
    fn test_linear_frontier_agrees() {
        let maze = diamond();
        let mut heap = ShortestPaths::new(&maze);
        let mut linear: ShortestPaths<&Maze, LinearQueue<NodeId>> = ShortestPaths::with_queue(&maze);
        heap.single_source_distances(NodeId(1)).unwrap();
        linear.single_source_distances(NodeId(1)).unwrap();

        for id in 1..=4 {
            let id = NodeId(id);
            assert_eq!(heap.distance(&id).unwrap(), linear.distance(&id).unwrap());
        }
    }
}
