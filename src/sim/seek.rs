//! Seek-phase environment.

use hashbrown::HashMap;

use crate::graph::{Maze, Reversed};
use crate::model::NodeId;
use crate::paths::ShortestPaths;
use crate::seek::{NeighborStatus, SeekState};
use crate::{Error, Result};
use smallvec::SmallVec;

/// A maze with a hidden target, revealed one neighborhood at a time.
///
/// Distance-to-target is the true shortest distance through the maze.
/// Nodes that cannot reach the target report `u32::MAX`.
#[derive(Debug, Clone)]
pub struct SeekSim {
    maze: Maze,
    position: NodeId,
    target: NodeId,
    to_target: HashMap<NodeId, u32>,
    trail: Vec<NodeId>,
}

impl SeekSim {
    pub fn new(maze: Maze, start: NodeId, target: NodeId) -> Result<Self> {
        for id in [start, target] {
            if !maze.contains(id) {
                return Err(Error::NotFound(format!("Node {id}")));
            }
        }

        let to_target = {
            let mut engine = ShortestPaths::new(Reversed(&maze));
            engine.single_source_distances(target)?;
            engine
                .reached()
                .map(|(id, d)| (*id, d.min(f64::from(u32::MAX - 1)) as u32))
                .collect()
        };

        Ok(Self { maze, position: start, target, to_target, trail: vec![start] })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Every node occupied so far, the start first.
    pub fn trail(&self) -> &[NodeId] {
        &self.trail
    }

    pub fn moves(&self) -> usize {
        self.trail.len() - 1
    }

    fn distance_of(&self, id: NodeId) -> u32 {
        self.to_target.get(&id).copied().unwrap_or(u32::MAX)
    }
}

impl SeekState for SeekSim {
    fn current_location(&self) -> NodeId {
        self.position
    }

    fn distance_to_target(&self) -> u32 {
        self.distance_of(self.position)
    }

    fn neighbors(&self) -> SmallVec<[NeighborStatus; 4]> {
        self.maze
            .neighbors(self.position)
            .into_iter()
            .map(|id| NeighborStatus::new(id, self.distance_of(id)))
            .collect()
    }

    fn move_to(&mut self, id: NodeId) -> Result<()> {
        if !self.maze.is_neighbor(self.position, id) {
            return Err(Error::IllegalMove { from: self.position, to: id });
        }
        self.position = id;
        self.trail.push(id);
        Ok(())
    }
}
