//! # maze-escape: Seek and Escape over Weighted Mazes
//!
//! A navigation agent for partially observable weighted mazes, in two
//! phases:
//!
//! 1. **Seek**: the maze is unknown. Depth-first exploration with exact
//!    backtracking, using only the current node's neighbors, until the
//!    agent stands on the target.
//! 2. **Escape**: the maze is fully visible. Walk to the exit within a hard
//!    move budget, detouring greedily for value without ever giving up a
//!    guaranteed path out.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `SeekState` / `EscapeState` are the contract with
//!    the host game loop; `WeightedGraph` is the contract with the engine
//! 2. **Clean DTOs**: `Node`, `Edge`, `NodeId` cross all boundaries
//! 3. **One source per engine**: `ShortestPaths` answers for its last run only
//! 4. **Loud failures**: querying an unreachable node is an error, never a default
//!
//! ## Quick Start
//!
//! ```rust
//! use maze_escape::{Agent, Maze, Node, NodeId};
//! use maze_escape::sim::EscapeSim;
//!
//! # fn example() -> maze_escape::Result<()> {
//! let mut maze = Maze::new();
//! maze.add_node(Node::new(NodeId(1)))?;
//! maze.add_node(Node::new(NodeId(2)).with_value(10))?;
//! maze.add_node(Node::new(NodeId(3)))?;
//! maze.connect(NodeId(1), NodeId(2), 1)?;
//! maze.connect(NodeId(2), NodeId(3), 1)?;
//!
//! let mut state = EscapeSim::new(maze, NodeId(1), NodeId(3), 2)?;
//! let report = Agent::default().escape(&mut state)?;
//! assert_eq!(report.value_collected, 10);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Environments
//!
//! | Environment | Module | Description |
//! |-------------|--------|-------------|
//! | `SeekSim` | `sim` | Hidden-target maze, reveals neighbors only |
//! | `EscapeSim` | `sim` | Visible maze with exit, budget and value pickup |
//! | host | external | Any game loop implementing the state traits |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod queue;
pub mod paths;
pub mod seek;
pub mod escape;
pub mod config;
pub mod sim;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{Node, NodeId, Edge, route_length};
pub use graph::{WeightedGraph, ReversibleGraph, Reversed, Maze};
pub use queue::{PriorityQueue, IndexedHeap, LinearQueue};
pub use paths::ShortestPaths;
pub use seek::{SeekState, NeighborStatus, ExplorationSearch, SeekOutcome, SeekReport};
pub use escape::{EscapeState, BudgetedCollector, EscapeReport};
pub use config::{AgentConfig, SeekConfig, CollectorConfig, PriorityTier, NeighborOrder};

// ============================================================================
// Top-level Agent handle
// ============================================================================

/// The primary entry point. An `Agent` runs both phases against whatever
/// environment the host provides.
#[derive(Debug, Clone, Default)]
pub struct Agent {
    config: AgentConfig,
}

impl Agent {
    /// Create an agent, rejecting invalid tuning up front.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Explore until the agent stands on the target or the maze is exhausted.
    pub fn seek<S: SeekState + ?Sized>(&self, state: &mut S) -> Result<SeekReport> {
        ExplorationSearch::new(self.config.seek.clone()).run(state)
    }

    /// Reach the exit within budget, collecting value on the way.
    pub fn escape<S: EscapeState + ?Sized>(&self, state: &mut S) -> Result<EscapeReport> {
        BudgetedCollector::new(self.config.collector.clone()).run(state)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Empty queue")]
    EmptyQueue,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No source: shortest paths queried before any single-source run")]
    NoSource,

    #[error("Unreachable: {0}")]
    Unreachable(String),

    #[error("Illegal move from {from} to {to}: not a neighbor")]
    IllegalMove { from: NodeId, to: NodeId },

    #[error("Budget exhausted: move costs {cost}, {remaining} steps to go")]
    BudgetExhausted { cost: u64, remaining: u64 },

    #[error("Exit {exit} is unreachable from {start}")]
    ExitUnreachable { start: NodeId, exit: NodeId },

    #[error("Insufficient budget: exit is {needed} away, {available} steps to go")]
    InsufficientBudget { needed: u64, available: u64 },

    #[error("Invalid maze: {0}")]
    InvalidMaze(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Which side of the contract an error blames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The core misused its own engine or queue.
    Programming,
    /// The environment and core disagree about what moves are legal.
    Environment,
    /// The phase was set up so it cannot succeed.
    Configuration,
}

impl Error {
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::DuplicateKey(_)
            | Error::EmptyQueue
            | Error::NotFound(_)
            | Error::NoSource
            | Error::Unreachable(_) => ErrorClass::Programming,
            Error::IllegalMove { .. } | Error::BudgetExhausted { .. } => ErrorClass::Environment,
            Error::ExitUnreachable { .. }
            | Error::InsufficientBudget { .. }
            | Error::InvalidMaze(_)
            | Error::InvalidConfig(_)
            | Error::Config(_) => ErrorClass::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
