//! End-to-end tests for the seek phase.
//!
//! Each test exercises: build maze -> SeekSim -> Agent::seek, then checks the
//! outcome, the move count and where the agent ended up.

use maze_escape::config::{AgentConfig, NeighborOrder, SeekConfig};
use maze_escape::sim::SeekSim;
use maze_escape::{
    Agent, Error, ErrorClass, ExplorationSearch, Maze, NeighborStatus, Node, NodeId,
    SeekOutcome, SeekState, ShortestPaths,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use smallvec::{smallvec, SmallVec};

// ============================================================================
// Helpers
// ============================================================================

fn maze_with(nodes: u64, links: &[(u64, u64)]) -> Maze {
    let mut maze = Maze::new();
    for id in 1..=nodes {
        maze.add_node(Node::new(NodeId(id))).unwrap();
    }
    for &(a, b) in links {
        maze.connect(NodeId(a), NodeId(b), 1).unwrap();
    }
    maze
}

fn ids(raw: &[u64]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId).collect()
}

/// 1 has a dead-end branch 2-3 listed before the branch to 4.
fn fork() -> Maze {
    maze_with(4, &[(1, 2), (2, 3), (1, 4)])
}

fn closest_first() -> Agent {
    Agent::new(AgentConfig {
        seek: SeekConfig { neighbor_order: NeighborOrder::ClosestFirst },
        ..AgentConfig::default()
    })
    .unwrap()
}

// ============================================================================
// 1. Finding the target
// ============================================================================

#[test]
fn test_two_nodes_one_move() {
    let mut sim = SeekSim::new(maze_with(2, &[(1, 2)]), NodeId(1), NodeId(2)).unwrap();
    let report = Agent::default().seek(&mut sim).unwrap();

    assert_eq!(report.outcome, SeekOutcome::Found);
    assert_eq!(report.moves, 1);
    assert_eq!(sim.current_location(), NodeId(2));
}

#[test]
fn test_start_on_target_makes_no_moves() {
    let mut sim = SeekSim::new(fork(), NodeId(3), NodeId(3)).unwrap();
    let report = Agent::default().seek(&mut sim).unwrap();

    assert_eq!(report.outcome, SeekOutcome::Found);
    assert_eq!(report.moves, 0);
    assert_eq!(sim.trail(), ids(&[3]).as_slice());
}

#[test]
fn test_dead_end_is_backtracked_exactly() {
    let mut sim = SeekSim::new(fork(), NodeId(1), NodeId(4)).unwrap();
    let report = Agent::default().seek(&mut sim).unwrap();

    assert_eq!(report.outcome, SeekOutcome::Found);
    assert_eq!(sim.trail(), ids(&[1, 2, 3, 2, 1, 4]).as_slice());
    assert_eq!(report.moves, 5);
    assert_eq!(report.visited, 4);
}

#[test]
fn test_closest_first_skips_dead_end() {
    let mut sim = SeekSim::new(fork(), NodeId(1), NodeId(4)).unwrap();
    let report = closest_first().seek(&mut sim).unwrap();

    assert_eq!(report.moves, 1);
    assert_eq!(sim.trail(), ids(&[1, 4]).as_slice());
}

#[test]
fn test_cycle_is_not_reentered() {
    // Square 1-2-3-4-1 with the target hanging off 3.
    let maze = maze_with(5, &[(1, 2), (2, 3), (3, 4), (4, 1), (3, 5)]);
    let mut sim = SeekSim::new(maze, NodeId(1), NodeId(5)).unwrap();
    let report = Agent::default().seek(&mut sim).unwrap();

    assert_eq!(report.outcome, SeekOutcome::Found);
    assert_eq!(sim.current_location(), NodeId(5));
    // 1 → 2 → 3 → 4, back to 3, then 5
    assert_eq!(sim.trail(), ids(&[1, 2, 3, 4, 3, 5]).as_slice());
}

#[test]
fn test_deep_line_uses_no_recursion() {
    let n = 10_000;
    let links: Vec<(u64, u64)> = (1..n).map(|i| (i, i + 1)).collect();
    let mut sim = SeekSim::new(maze_with(n, &links), NodeId(1), NodeId(n)).unwrap();
    let report = Agent::default().seek(&mut sim).unwrap();

    assert_eq!(report.outcome, SeekOutcome::Found);
    assert_eq!(report.moves, (n - 1) as usize);
}

// ============================================================================
// 2. Exhausting the maze
// ============================================================================

#[test]
fn test_unreachable_target_returns_to_start() {
    // 6-7 is a separate component holding the target.
    let maze = maze_with(7, &[(1, 2), (2, 3), (1, 4), (4, 5), (6, 7)]);
    let mut sim = SeekSim::new(maze, NodeId(1), NodeId(7)).unwrap();
    let report = Agent::default().seek(&mut sim).unwrap();

    assert_eq!(report.outcome, SeekOutcome::Exhausted);
    assert_eq!(report.visited, 5);
    // Tree of 5 nodes: every edge walked once each way.
    assert_eq!(report.moves, 8);
    assert_eq!(sim.current_location(), NodeId(1));
}

#[test]
fn test_isolated_start_is_exhausted_immediately() {
    let mut sim = SeekSim::new(maze_with(2, &[]), NodeId(1), NodeId(2)).unwrap();
    let report = Agent::default().seek(&mut sim).unwrap();

    assert_eq!(report.outcome, SeekOutcome::Exhausted);
    assert_eq!(report.moves, 0);
    assert_eq!(report.visited, 1);
}

// ============================================================================
// 3. Environment errors
// ============================================================================

/// Reports a neighbor it then refuses to move to.
struct Liar;

impl SeekState for Liar {
    fn current_location(&self) -> NodeId {
        NodeId(0)
    }

    fn distance_to_target(&self) -> u32 {
        1
    }

    fn neighbors(&self) -> SmallVec<[NeighborStatus; 4]> {
        smallvec![NeighborStatus::new(NodeId(1), 0)]
    }

    fn move_to(&mut self, id: NodeId) -> maze_escape::Result<()> {
        Err(Error::IllegalMove { from: NodeId(0), to: id })
    }
}

#[test]
fn test_move_error_aborts_search() {
    let err = ExplorationSearch::default().run(&mut Liar).unwrap_err();
    assert!(matches!(err, Error::IllegalMove { from: NodeId(0), to: NodeId(1) }));
    assert_eq!(err.class(), ErrorClass::Environment);
}

// ============================================================================
// 4. Random mazes
// ============================================================================

fn random_maze() -> impl Strategy<Value = (Maze, u64)> {
    (2u64..14).prop_flat_map(|n| {
        (
            prop::collection::vec((1..=n, 1..=n, 1u32..4), 0..(2 * n as usize)),
            1..=n,
        )
            .prop_map(move |(links, target)| {
                let mut maze = Maze::new();
                for id in 1..=n {
                    maze.add_node(Node::new(NodeId(id))).unwrap();
                }
                for (a, b, length) in links {
                    maze.connect(NodeId(a), NodeId(b), length).unwrap();
                }
                (maze, target)
            })
    })
}

proptest! {
    #[test]
    fn seek_finds_reachable_targets((maze, target) in random_maze()) {
        let mut reach = ShortestPaths::new(&maze);
        reach.single_source_distances(NodeId(1)).unwrap();
        let reachable = reach.is_reachable(&NodeId(target));
        let component = reach.reached().count();

        let mut sim = SeekSim::new(maze.clone(), NodeId(1), NodeId(target)).unwrap();
        let report = Agent::default().seek(&mut sim).unwrap();

        if reachable {
            prop_assert_eq!(report.outcome, SeekOutcome::Found);
            prop_assert_eq!(sim.current_location(), NodeId(target));
        } else {
            prop_assert_eq!(report.outcome, SeekOutcome::Exhausted);
            prop_assert_eq!(sim.current_location(), NodeId(1));
            prop_assert_eq!(report.visited, component);
        }
        prop_assert_eq!(report.moves, sim.moves());
    }
}
