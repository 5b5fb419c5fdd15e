//! # Escape Phase
//!
//! With the whole maze visible, walk to the exit inside a hard move budget
//! while detouring greedily for value.
//!
//! ```text
//! to_exit  = Dijkstra on the transposed maze, rooted at the exit (once)
//! scram    = Dijkstra rooted at the agent, re-rooted after every move
//! loop while candidates remain and the agent is not on the exit:
//!     target = best candidate still reachable from here
//!     next   = first hop of scram.best_path(target)
//!     if to_exit(next) + scram(next) < steps_to_go  → detour one hop
//!     else                                          → one hop toward exit
//!     re-root scram, re-score candidates
//! walk scram.best_path(exit)
//! ```
//!
//! ## Safety invariant
//!
//! After every move, `steps_to_go >= distance(current, exit)`. The
//! round-trip check guards detour hops; hops toward the exit lower both
//! sides by the same amount. Preconditions are checked once before the
//! first move: the exit must be reachable and affordable from the start.
//! A detour hop needs a finite `to_exit(next)`, so on one-way mazes the agent
//! never steps onto a node the exit cannot be reached from.

pub mod candidates;

use hashbrown::HashSet;

use crate::config::CollectorConfig;
use crate::graph::{Maze, Reversed};
use crate::model::NodeId;
use crate::paths::ShortestPaths;
use crate::{Error, Result};

pub use candidates::{candidate_priority, CandidateSet};

// ============================================================================
// Environment contract
// ============================================================================

/// Full view of the maze during the escape phase.
pub trait EscapeState {
    /// Every node with its current value, and every edge.
    fn maze(&self) -> &Maze;

    /// Node the agent stands on.
    fn current_node(&self) -> NodeId;

    fn exit(&self) -> NodeId;

    /// Remaining move budget, in edge-length units.
    fn steps_to_go(&self) -> u64;

    /// Step to a direct neighbor, paying that edge's length.
    fn move_to(&mut self, id: NodeId) -> Result<()>;
}

/// Summary of one escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeReport {
    pub moves: usize,
    /// Moves taken toward a candidate rather than toward the exit.
    pub detours: usize,
    /// Distinct candidates whose detour was refused at least once.
    pub abandoned: usize,
    pub value_collected: u64,
    pub steps_remaining: u64,
}

// ============================================================================
// Collector
// ============================================================================

/// Greedy value collector that never strands the agent.
#[derive(Debug, Clone, Default)]
pub struct BudgetedCollector {
    config: CollectorConfig,
}

impl BudgetedCollector {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Drive the agent from its current node to the exit.
    ///
    /// Fails before any move with `ExitUnreachable` or `InsufficientBudget`
    /// when the phase cannot be completed at all. Environment errors from
    /// `move_to` abort the phase.
    pub fn run<S: EscapeState + ?Sized>(&self, state: &mut S) -> Result<EscapeReport> {
        // Topology never changes during the phase; values are read live.
        let maze = state.maze().clone();
        let exit = state.exit();
        let start = state.current_node();
        let value_before = state.maze().total_value();

        let mut to_exit = ShortestPaths::new(Reversed(&maze));
        to_exit.single_source_distances(exit)?;
        let needed = to_exit
            .distance(&start)
            .map_err(|_| Error::ExitUnreachable { start, exit })?;
        let available = state.steps_to_go();
        if needed > available as f64 {
            return Err(Error::InsufficientBudget { needed: needed as u64, available });
        }

        let mut scram = ShortestPaths::new(&maze);
        scram.single_source_distances(start)?;

        let mut visited: HashSet<NodeId> = HashSet::new();
        visited.insert(start);
        let mut candidates = CandidateSet::new();
        candidates.refresh(
            state.maze(),
            &scram,
            &visited,
            &self.config.initial_tiers,
            self.config.no_preference,
        )?;

        let mut moves = 0usize;
        let mut detours = 0usize;
        let mut abandoned: HashSet<NodeId> = HashSet::new();

        while state.current_node() != exit {
            let Some(target) = candidates.next(state.maze(), &scram, &visited)? else {
                break;
            };
            let here = state.current_node();
            let path = scram.best_path(&target)?;
            let Some(hop) = path.first() else {
                continue;
            };
            let next = hop.dst;

            let budget = state.steps_to_go() as f64;
            let round_trip = to_exit
                .distance(&next)
                .and_then(|back| Ok(back + scram.distance(&next)?));
            let affordable = matches!(round_trip, Ok(cost) if cost < budget);

            if maze.is_neighbor(here, next) && affordable {
                state.move_to(next)?;
                visited.insert(next);
                detours += 1;
                tracing::debug!(
                    from = %here, to = %next, %target,
                    steps_to_go = state.steps_to_go(),
                    "escape: detour hop"
                );
            } else {
                if abandoned.insert(target) {
                    tracing::warn!(%target, %next, budget, "escape: detour abandoned");
                } else {
                    tracing::debug!(%target, %next, budget, "escape: detour still unaffordable");
                }
                let shortcut = scram.best_path(&exit)?;
                let Some(step) = shortcut.first() else {
                    break;
                };
                state.move_to(step.dst)?;
                visited.insert(step.dst);
                tracing::debug!(
                    from = %here, to = %step.dst,
                    steps_to_go = state.steps_to_go(),
                    "escape: exit hop"
                );
            }
            moves += 1;

            scram.single_source_distances(state.current_node())?;
            candidates.refresh(
                state.maze(),
                &scram,
                &visited,
                &self.config.replan_tiers,
                self.config.no_preference,
            )?;
        }

        scram.single_source_distances(state.current_node())?;
        for edge in scram.best_path(&exit)? {
            state.move_to(edge.dst)?;
            moves += 1;
            tracing::debug!(to = %edge.dst, steps_to_go = state.steps_to_go(), "escape: final walk");
        }

        let report = EscapeReport {
            moves,
            detours,
            abandoned: abandoned.len(),
            value_collected: value_before.saturating_sub(state.maze().total_value()),
            steps_remaining: state.steps_to_go(),
        };
        tracing::info!(
            moves = report.moves,
            detours = report.detours,
            abandoned = report.abandoned,
            value = report.value_collected,
            steps_remaining = report.steps_remaining,
            "escape: reached exit"
        );
        Ok(report)
    }
}
