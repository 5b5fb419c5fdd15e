//! # Maze Model
//!
//! Plain data that crosses every boundary: environment ↔ engine ↔ agent.
//! No I/O, no state machines, no algorithms here.

pub mod node;
pub mod edge;

pub use node::{Node, NodeId};
pub use edge::{Edge, route_length};
