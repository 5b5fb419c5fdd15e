//! Indexed binary min-heap.
//!
//! A `Vec`-backed heap plus a `HashMap` from item to heap slot. The index
//! makes `contains`, `priority` and `change_priority` cheap: the slot is
//! found in O(1) and the entry sifts in O(log n) in whichever direction the
//! new priority requires.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use hashbrown::HashMap;

use super::{rank, PriorityQueue};
use crate::{Error, Result};

#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    priority: f64,
    seq: u64,
}

impl<T> Entry<T> {
    fn key(&self) -> (f64, u64) {
        (self.priority, self.seq)
    }
}

/// Binary min-heap with a position index for in-place priority changes.
#[derive(Debug, Clone)]
pub struct IndexedHeap<T> {
    heap: Vec<Entry<T>>,
    slots: HashMap<T, usize>,
    next_seq: u64,
}

impl<T> Default for IndexedHeap<T> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            slots: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> IndexedHeap<T>
where
    T: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn less(&self, a: usize, b: usize) -> bool {
        rank(self.heap[a].key(), self.heap[b].key()) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        if let Some(slot) = self.slots.get_mut(&self.heap[a].item) {
            *slot = a;
        }
        if let Some(slot) = self.slots.get_mut(&self.heap[b].item) {
            *slot = b;
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T> PriorityQueue<T> for IndexedHeap<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn len(&self) -> usize {
        self.heap.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.slots.contains_key(item)
    }

    fn priority(&self, item: &T) -> Option<f64> {
        self.slots.get(item).map(|&slot| self.heap[slot].priority)
    }

    fn add(&mut self, item: T, priority: f64) -> Result<()> {
        if self.slots.contains_key(&item) {
            return Err(Error::DuplicateKey(format!("{item:?}")));
        }
        let slot = self.heap.len();
        self.slots.insert(item.clone(), slot);
        self.heap.push(Entry { item, priority, seq: self.next_seq });
        self.next_seq += 1;
        self.sift_up(slot);
        Ok(())
    }

    fn peek(&self) -> Result<&T> {
        self.heap.first().map(|e| &e.item).ok_or(Error::EmptyQueue)
    }

    fn extract_min(&mut self) -> Result<T> {
        if self.heap.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop().ok_or(Error::EmptyQueue)?;
        self.slots.remove(&entry.item);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(entry.item)
    }

    fn change_priority(&mut self, item: &T, priority: f64) -> Result<()> {
        let slot = *self
            .slots
            .get(item)
            .ok_or_else(|| Error::NotFound(format!("{item:?}")))?;
        let old = self.heap[slot].priority;
        self.heap[slot].priority = priority;
        match priority.total_cmp(&old) {
            Ordering::Less => self.sift_up(slot),
            Ordering::Greater => self.sift_down(slot),
            Ordering::Equal => {}
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
