//! Binary min-heap keyed by a separate priority.
//!
//! Entries live densely in a `Vec<(T, P)>`. The invariant is that no parent
//! compares greater than either child under the comparer fixed at
//! construction, so index 0 always holds a minimal priority.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use lazyq_core::compare::{default_comparer, Comparer};
use lazyq_core::config::QueryConfig;

use crate::error::{Error, Result};

pub struct PriorityQueue<T, P> {
    nodes: Vec<(T, P)>,
    comparer: Comparer<P>,
}

impl<T, P: PartialOrd + 'static> PriorityQueue<T, P> {
    /// Empty queue ordered by `PartialOrd`; incomparable priorities tie.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            comparer: default_comparer(),
        }
    }

    pub fn with_config(config: &QueryConfig) -> Self {
        Self::with_capacity(config.initial_capacity())
    }
}

impl<T, P: PartialOrd + 'static> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> PriorityQueue<T, P> {
    pub fn with_comparer<C>(comparer: C) -> Self
    where
        C: Fn(&P, &P) -> Ordering + 'static,
    {
        Self {
            nodes: Vec::new(),
            comparer: Rc::new(comparer),
        }
    }

    pub fn enqueue(&mut self, item: T, priority: P) {
        #[cfg(feature = "tracing")]
        if self.nodes.len() == self.nodes.capacity() {
            tracing::trace!(len = self.nodes.len(), "priority queue growing");
        }
        self.nodes.push((item, priority));
        self.sift_up(self.nodes.len() - 1);
    }

    pub fn enqueue_range<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (T, P)>,
    {
        let entries = entries.into_iter();
        self.nodes.reserve(entries.size_hint().0);
        for (item, priority) in entries {
            self.enqueue(item, priority);
        }
    }

    /// Remove and return an item with minimal priority.
    pub fn dequeue(&mut self) -> Result<T> {
        self.try_dequeue().ok_or(Error::Empty {
            collection: "priority queue",
            op: "dequeue",
        })
    }

    pub fn try_dequeue(&mut self) -> Option<T> {
        self.try_dequeue_entry().map(|(item, _)| item)
    }

    /// Like [`PriorityQueue::try_dequeue`], keeping the priority.
    pub fn try_dequeue_entry(&mut self) -> Option<(T, P)> {
        if self.nodes.is_empty() {
            return None;
        }
        let entry = self.nodes.swap_remove(0);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Some(entry)
    }

    pub fn peek(&self) -> Result<&T> {
        self.try_peek().ok_or(Error::Empty {
            collection: "priority queue",
            op: "peek",
        })
    }

    pub fn try_peek(&self) -> Option<&T> {
        self.nodes.first().map(|(item, _)| item)
    }

    pub fn peek_priority(&self) -> Option<&P> {
        self.nodes.first().map(|(_, priority)| priority)
    }

    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.nodes.len(), "priority queue cleared");
        self.nodes.clear();
    }

    /// Copy the items, in backing order, into `target` starting at `index`.
    pub fn copy_to(&self, target: &mut [T], index: usize) -> Result<()>
    where
        T: Clone,
    {
        let out_of_range = Error::OutOfRange {
            index,
            len: self.nodes.len(),
            target: target.len(),
        };
        let end = index
            .checked_add(self.nodes.len())
            .ok_or(out_of_range.clone())?;
        let slots = target.get_mut(index..end).ok_or(out_of_range)?;
        for (slot, (item, _)) in slots.iter_mut().zip(&self.nodes) {
            *slot = item.clone();
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn comparer(&self) -> &Comparer<P> {
        &self.comparer
    }

    /// The backing entries in heap order, not priority order.
    pub fn unordered_items(&self) -> &[(T, P)] {
        &self.nodes
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.comparer)(&self.nodes[a].1, &self.nodes[b].1) == Ordering::Less
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.nodes.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(smaller, pos) {
                break;
            }
            self.nodes.swap(pos, smaller);
            pos = smaller;
        }
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for PriorityQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}
