//! # Priority Queue Trait
//!
//! The min-priority associative queue shared by the shortest-path engine
//! and the escape collector. Items are keys: each appears at most once and
//! carries exactly one priority.
//!
//! ## Implementations
//!
//! | Queue | Module | Description |
//! |-------|--------|-------------|
//! | `IndexedHeap` | `heap` | Binary heap + position index, O(log n) everything |
//! | `LinearQueue` | `linear` | Unordered vector, O(n) extract, the reference model |
//!
//! Ties are broken by insertion order: of two items with equal priority, the
//! one added first is extracted first. `change_priority` keeps an item's
//! original insertion rank.

pub mod heap;
pub mod linear;

use std::cmp::Ordering;

use crate::Result;

pub use heap::IndexedHeap;
pub use linear::LinearQueue;

/// Mutable min-priority queue over distinct items.
pub trait PriorityQueue<T> {
    /// Number of items currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `item` is currently queued.
    fn contains(&self, item: &T) -> bool;

    /// Current priority of `item`, if queued.
    fn priority(&self, item: &T) -> Option<f64>;

    /// Queue `item` at `priority`.
    ///
    /// Fails with `DuplicateKey` if the item is already present; the queue is
    /// left untouched in that case.
    fn add(&mut self, item: T, priority: f64) -> Result<()>;

    /// The lowest-priority item without removing it. Fails with `EmptyQueue`.
    fn peek(&self) -> Result<&T>;

    /// Remove and return the lowest-priority item. Fails with `EmptyQueue`.
    fn extract_min(&mut self) -> Result<T>;

    /// Set the priority of a queued item. Fails with `NotFound` if absent.
    ///
    /// Lowering is the hot path for Dijkstra relaxation. Raising must be
    /// correct, and is not required to be fast.
    fn change_priority(&mut self, item: &T, priority: f64) -> Result<()>;
}

/// Total order on `(priority, insertion rank)`.
pub(crate) fn rank(a: (f64, u64), b: (f64, u64)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}
