//! Escape-phase environment.

use crate::escape::EscapeState;
use crate::graph::Maze;
use crate::model::NodeId;
use crate::{Error, Result};

/// Position and remaining budget after one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub node: NodeId,
    pub steps_to_go: u64,
}

/// A fully visible maze with an exit and a countdown.
#[derive(Debug, Clone)]
pub struct EscapeSim {
    maze: Maze,
    start: NodeId,
    position: NodeId,
    exit: NodeId,
    steps_to_go: u64,
    collected: u64,
    trail: Vec<Step>,
}

impl EscapeSim {
    /// Place the agent on `start` and collect whatever lies there.
    pub fn new(mut maze: Maze, start: NodeId, exit: NodeId, steps_to_go: u64) -> Result<Self> {
        if !maze.contains(exit) {
            return Err(Error::NotFound(format!("Node {exit}")));
        }
        let collected = u64::from(maze.collect(start)?);
        Ok(Self {
            maze,
            start,
            position: start,
            exit,
            steps_to_go,
            collected,
            trail: Vec::new(),
        })
    }

    /// Total value picked up, including the start node.
    pub fn collected(&self) -> u64 {
        self.collected
    }

    /// One entry per move, in order.
    pub fn trail(&self) -> &[Step] {
        &self.trail
    }

    /// Nodes occupied so far, the start first.
    pub fn route(&self) -> Vec<NodeId> {
        std::iter::once(self.start)
            .chain(self.trail.iter().map(|s| s.node))
            .collect()
    }
}

impl EscapeState for EscapeSim {
    fn maze(&self) -> &Maze {
        &self.maze
    }

    fn current_node(&self) -> NodeId {
        self.position
    }

    fn exit(&self) -> NodeId {
        self.exit
    }

    fn steps_to_go(&self) -> u64 {
        self.steps_to_go
    }

    fn move_to(&mut self, id: NodeId) -> Result<()> {
        let edge = self
            .maze
            .edge_between(self.position, id)
            .ok_or(Error::IllegalMove { from: self.position, to: id })?;
        let cost = u64::from(edge.length);
        if cost > self.steps_to_go {
            return Err(Error::BudgetExhausted { cost, remaining: self.steps_to_go });
        }

        self.steps_to_go -= cost;
        self.position = id;
        self.collected += u64::from(self.maze.collect(id)?);
        self.trail.push(Step { node: id, steps_to_go: self.steps_to_go });
        Ok(())
    }
}
