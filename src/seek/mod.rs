//! # Seek Phase
//!
//! Depth-first exploration of a maze the agent cannot see, stopping the
//! moment it stands on the target.
//!
//! The environment only ever reveals the current node, its neighbors, and
//! how far each of them is from the target. The search keeps a visited set
//! and an explicit stack of frames, so arbitrarily deep mazes never touch
//! the call stack.
//!
//! ## Backtracking
//!
//! When every neighbor of a frame is exhausted the frame is popped and the
//! agent walks back to the parent frame's node. A subtree that does not
//! contain the target therefore leaves the agent exactly where its
//! exploration began. If the whole reachable maze is exhausted, the agent
//! ends on the start node.

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::config::{NeighborOrder, SeekConfig};
use crate::model::NodeId;
use crate::Result;

// ============================================================================
// Environment contract
// ============================================================================

/// What the environment reports about one neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborStatus {
    pub id: NodeId,
    pub distance_to_target: u32,
}

impl NeighborStatus {
    pub fn new(id: NodeId, distance_to_target: u32) -> Self {
        Self { id, distance_to_target }
    }
}

/// Local view of the maze during the seek phase.
pub trait SeekState {
    /// Node the agent stands on.
    fn current_location(&self) -> NodeId;

    /// Distance from the current node to the target. Zero means arrived.
    fn distance_to_target(&self) -> u32;

    /// Neighbors of the current node. The order is the environment's
    /// choice but must be stable for a fixed state.
    fn neighbors(&self) -> SmallVec<[NeighborStatus; 4]>;

    /// Step to a direct neighbor. Any other id is an environment error.
    fn move_to(&mut self, id: NodeId) -> Result<()>;
}

// ============================================================================
// Outcome
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOutcome {
    /// The agent stands on the target.
    Found,
    /// Every reachable node was visited; the agent is back at the start.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekReport {
    pub outcome: SeekOutcome,
    /// Moves requested, backtracking included.
    pub moves: usize,
    /// Distinct nodes entered, the start included.
    pub visited: usize,
}

// ============================================================================
// Search
// ============================================================================

struct Frame {
    node: NodeId,
    pending: SmallVec<[NodeId; 4]>,
    next: usize,
}

/// Depth-first search with chronological backtracking.
#[derive(Debug, Clone, Default)]
pub struct ExplorationSearch {
    config: SeekConfig,
}

impl ExplorationSearch {
    pub fn new(config: SeekConfig) -> Self {
        Self { config }
    }

    fn frame<S: SeekState + ?Sized>(&self, state: &S) -> Frame {
        let mut neighbors = state.neighbors();
        if self.config.neighbor_order == NeighborOrder::ClosestFirst {
            // stable: equal distances keep environment order
            neighbors.sort_by_key(|n| n.distance_to_target);
        }
        Frame {
            node: state.current_location(),
            pending: neighbors.iter().map(|n| n.id).collect(),
            next: 0,
        }
    }

    /// Explore from the agent's current node until the target is found or
    /// nothing reachable is left.
    ///
    /// Environment errors from `move_to` abort the search immediately.
    pub fn run<S: SeekState + ?Sized>(&self, state: &mut S) -> Result<SeekReport> {
        let start = state.current_location();
        let mut moves = 0usize;

        if state.distance_to_target() == 0 {
            tracing::info!(%start, "seek: started on target");
            return Ok(SeekReport { outcome: SeekOutcome::Found, moves, visited: 1 });
        }

        let mut visited: HashSet<NodeId> = HashSet::new();
        visited.insert(start);
        let mut stack = vec![self.frame(state)];

        while let Some(top) = stack.last_mut() {
            if top.next < top.pending.len() {
                let next = top.pending[top.next];
                top.next += 1;
                if visited.contains(&next) {
                    continue;
                }

                state.move_to(next)?;
                moves += 1;
                tracing::debug!(to = %next, depth = stack.len(), "seek: advance");

                if state.distance_to_target() == 0 {
                    tracing::info!(at = %next, moves, "seek: target found");
                    return Ok(SeekReport {
                        outcome: SeekOutcome::Found,
                        moves,
                        visited: visited.len() + 1,
                    });
                }
                visited.insert(next);
                stack.push(self.frame(state));
            } else {
                let done = top.node;
                stack.pop();
                if let Some(parent) = stack.last() {
                    state.move_to(parent.node)?;
                    moves += 1;
                    tracing::debug!(from = %done, to = %parent.node, "seek: backtrack");
                }
            }
        }

        tracing::info!(%start, moves, visited = visited.len(), "seek: maze exhausted");
        Ok(SeekReport { outcome: SeekOutcome::Exhausted, moves, visited: visited.len() })
    }
}
