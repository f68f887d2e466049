//! FIFO queue on top of [`LinkedList`].

use std::fmt;

use lazyq_core::config::QueryConfig;
use lazyq_core::sequence::Seq;

use crate::error::{Error, Result};
use crate::linked::{Iter, LinkedList};

pub struct Queue<T> {
    list: LinkedList<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    pub fn with_config(config: &QueryConfig) -> Self {
        Self {
            list: LinkedList::with_config(config),
        }
    }

    pub fn enqueue(&mut self, item: T) {
        self.list.add_last(item);
    }

    pub fn dequeue(&mut self) -> Result<T> {
        self.try_dequeue().ok_or(Error::Empty {
            collection: "queue",
            op: "dequeue",
        })
    }

    pub fn try_dequeue(&mut self) -> Option<T> {
        self.list.try_remove_first()
    }

    pub fn peek(&self) -> Result<&T> {
        self.try_peek().ok_or(Error::Empty {
            collection: "queue",
            op: "peek",
        })
    }

    pub fn try_peek(&self) -> Option<&T> {
        self.list.front()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Items from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    pub fn to_seq(&self) -> Seq<T>
    where
        T: Clone + 'static,
    {
        self.list.to_seq()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue").field("items", &self.list).finish()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}
