//! Linear-scan priority queue.
//!
//! Every operation except `add` walks the whole vector. Kept as the
//! reference model the heap is checked against, and usable for tiny
//! frontiers where the index overhead is not worth it.

use std::fmt::Debug;

use super::{rank, PriorityQueue};
use crate::{Error, Result};

/// Unordered `(item, priority, rank)` list.
#[derive(Debug, Clone)]
pub struct LinearQueue<T> {
    entries: Vec<(T, f64, u64)>,
    next_seq: u64,
}

impl<T> Default for LinearQueue<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), next_seq: 0 }
    }
}

impl<T: PartialEq + Debug> LinearQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, item: &T) -> Option<usize> {
        self.entries.iter().position(|(t, _, _)| t == item)
    }

    fn min_position(&self) -> Option<usize> {
        (0..self.entries.len()).min_by(|&a, &b| {
            let (_, pa, sa) = &self.entries[a];
            let (_, pb, sb) = &self.entries[b];
            rank((*pa, *sa), (*pb, *sb))
        })
    }
}

impl<T: PartialEq + Debug> PriorityQueue<T> for LinearQueue<T> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    fn priority(&self, item: &T) -> Option<f64> {
        self.position(item).map(|i| self.entries[i].1)
    }

    fn add(&mut self, item: T, priority: f64) -> Result<()> {
        if self.contains(&item) {
            return Err(Error::DuplicateKey(format!("{item:?}")));
        }
        self.entries.push((item, priority, self.next_seq));
        self.next_seq += 1;
        Ok(())
    }

    fn peek(&self) -> Result<&T> {
        self.min_position()
            .map(|i| &self.entries[i].0)
            .ok_or(Error::EmptyQueue)
    }

    fn extract_min(&mut self) -> Result<T> {
        let i = self.min_position().ok_or(Error::EmptyQueue)?;
        Ok(self.entries.swap_remove(i).0)
    }

    fn change_priority(&mut self, item: &T, priority: f64) -> Result<()> {
        let i = self
            .position(item)
            .ok_or_else(|| Error::NotFound(format!("{item:?}")))?;
        self.entries[i].1 = priority;
        Ok(())
    }
}
