//! In-memory reference environments.
//!
//! These are the reference implementations of `SeekState` and
//! `EscapeState`. They hold a `Maze` and enforce the environment side of
//! the contract:
//!
//! - Moves must go to a direct neighbor (`IllegalMove` otherwise).
//! - Escape moves cost the edge length and cannot overdraw the budget
//!   (`BudgetExhausted`).
//! - Value is collected on arrival, the start node included.
//!
//! Use them for:
//! - Testing the seek and escape strategies without a game loop
//! - Replaying a maze loaded from JSON
//! - Auditing a run after the fact through the recorded trail

pub mod seek;
pub mod escape;

pub use seek::SeekSim;
pub use escape::{EscapeSim, Step};
