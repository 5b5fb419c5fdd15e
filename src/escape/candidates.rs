//! Collection candidates and their scoring.

use hashbrown::HashSet;

use crate::config::PriorityTier;
use crate::graph::Maze;
use crate::model::NodeId;
use crate::paths::ShortestPaths;
use crate::queue::{IndexedHeap, PriorityQueue};
use crate::Result;

/// Score a node worth `base_value` lying `distance` away.
///
/// Richer and closer nodes score lower (more negative) and are tried first.
pub fn candidate_priority(
    base_value: u32,
    distance: f64,
    tiers: &[PriorityTier],
    no_preference: f64,
) -> f64 {
    tiers
        .iter()
        .find(|tier| base_value > tier.above)
        .map_or(no_preference, |tier| -(f64::from(base_value) / distance) * tier.scale)
}

/// Nodes with collectible value, ranked by `candidate_priority`.
///
/// Entries can go stale between refreshes (the value was collected on the
/// way somewhere else); `next` skips those.
#[derive(Debug, Default)]
pub struct CandidateSet {
    queue: IndexedHeap<NodeId>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.queue.contains(&id)
    }

    /// Re-score every eligible node against `from`'s current source.
    ///
    /// Eligible: not visited, positive current value, reachable at a
    /// positive distance. Queued nodes get their priority changed, new ones
    /// are added. Returns the number of nodes scored.
    pub fn refresh(
        &mut self,
        maze: &Maze,
        from: &ShortestPaths<&Maze>,
        visited: &HashSet<NodeId>,
        tiers: &[PriorityTier],
        no_preference: f64,
    ) -> Result<usize> {
        let mut scored = 0;
        for node in maze.nodes() {
            if !node.has_value() || visited.contains(&node.id) {
                continue;
            }
            let Ok(distance) = from.distance(&node.id) else {
                continue;
            };
            if distance <= 0.0 {
                continue;
            }

            let priority = candidate_priority(node.base_value, distance, tiers, no_preference);
            if self.queue.contains(&node.id) {
                self.queue.change_priority(&node.id, priority)?;
            } else {
                self.queue.add(node.id, priority)?;
            }
            scored += 1;
        }
        Ok(scored)
    }

    /// Best candidate still worth visiting from `from`'s source, or `None`
    /// once exhausted.
    ///
    /// An entry is stale when its value is gone, it was visited, or it can
    /// no longer be reached (one-way edges can leave it behind). Stale
    /// entries are dropped.
    pub fn next(
        &mut self,
        maze: &Maze,
        from: &ShortestPaths<&Maze>,
        visited: &HashSet<NodeId>,
    ) -> Result<Option<NodeId>> {
        while !self.queue.is_empty() {
            let id = self.queue.extract_min()?;
            let live = maze.node(id).is_some_and(|n| n.has_value());
            if live && !visited.contains(&id) && from.is_reachable(&id) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectorConfig;
    use crate::model::Node;

    #[test]
    fn test_priority_tiers() {
        let tiers = CollectorConfig::default().replan_tiers;

        assert_eq!(candidate_priority(500, 2.0, &tiers, 1000.0), -2000.0);
        assert_eq!(candidate_priority(300, 3.0, &tiers, 1000.0), -100.0);
        assert_eq!(candidate_priority(50, 5.0, &tiers, 1000.0), -10.0);
        assert_eq!(candidate_priority(10, 1.0, &tiers, 1000.0), 1000.0);
    }

    #[test]
    fn test_closer_richer_preferred() {
        let tiers = CollectorConfig::default().initial_tiers;
        let near = candidate_priority(100, 1.0, &tiers, 1000.0);
        let far = candidate_priority(100, 4.0, &tiers, 1000.0);
        let rich = candidate_priority(400, 4.0, &tiers, 1000.0);
        assert!(near < far);
        assert!(rich < far);
    }

    fn line_with_values() -> Maze {
        let mut maze = Maze::new();
        maze.add_node(Node::new(NodeId(1))).unwrap();
        maze.add_node(Node::new(NodeId(2)).with_value(50)).unwrap();
        maze.add_node(Node::new(NodeId(3)).with_value(500)).unwrap();
        maze.add_node(Node::new(NodeId(4)).with_value(80)).unwrap();
        maze.connect(NodeId(1), NodeId(2), 1).unwrap();
        maze.connect(NodeId(2), NodeId(3), 1).unwrap();
        maze
    }

    #[test]
    fn test_refresh_skips_ineligible_and_rescores() {
        let maze = line_with_values();
        let tiers = CollectorConfig::default().initial_tiers;
        let mut engine = ShortestPaths::new(&maze);
        engine.single_source_distances(NodeId(1)).unwrap();

        let mut set = CandidateSet::new();
        let visited = HashSet::new();
        // node 4 is unreachable, node 1 has nothing
        assert_eq!(set.refresh(&maze, &engine, &visited, &tiers, 1000.0).unwrap(), 2);
        assert!(!set.contains(NodeId(4)));

        engine.single_source_distances(NodeId(2)).unwrap();
        // node 2 is now at distance zero and drops out of scoring
        assert_eq!(set.refresh(&maze, &engine, &visited, &tiers, 1000.0).unwrap(), 1);
        assert_eq!(set.next(&maze, &engine, &visited).unwrap(), Some(NodeId(3)));
    }

    #[test]
    fn test_next_discards_stale_entries() {
        let mut maze = line_with_values();
        let tiers = CollectorConfig::default().initial_tiers;
        let snapshot = maze.clone();
        let mut engine = ShortestPaths::new(&snapshot);
        engine.single_source_distances(NodeId(1)).unwrap();

        let mut set = CandidateSet::new();
        let visited = HashSet::new();
        set.refresh(&maze, &engine, &visited, &tiers, 1000.0).unwrap();

        maze.collect(NodeId(3)).unwrap();
        assert_eq!(set.next(&maze, &engine, &visited).unwrap(), Some(NodeId(2)));
        assert_eq!(set.next(&maze, &engine, &visited).unwrap(), None);
    }

    #[test]
    fn test_next_drops_entries_left_behind() {
        // 1 -> 2 -> 3 one way, with 40 on 2 and 60 on 3.
        let mut maze = Maze::new();
        maze.add_node(Node::new(NodeId(1))).unwrap();
        maze.add_node(Node::new(NodeId(2)).with_value(40)).unwrap();
        maze.add_node(Node::new(NodeId(3)).with_value(60)).unwrap();
        maze.add_edge(NodeId(1), NodeId(2), 1).unwrap();
        maze.add_edge(NodeId(2), NodeId(3), 1).unwrap();
        let tiers = CollectorConfig::default().initial_tiers;

        let mut engine = ShortestPaths::new(&maze);
        engine.single_source_distances(NodeId(1)).unwrap();
        let mut set = CandidateSet::new();
        let visited = HashSet::new();
        set.refresh(&maze, &engine, &visited, &tiers, 1000.0).unwrap();

        // Standing on 3: it is visited, and 2 is behind a one-way edge.
        engine.single_source_distances(NodeId(3)).unwrap();
        let visited: HashSet<NodeId> = [NodeId(3)].into_iter().collect();
        assert_eq!(set.next(&maze, &engine, &visited).unwrap(), None);
        assert!(set.is_empty());
    }
}
