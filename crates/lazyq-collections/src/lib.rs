#![forbid(unsafe_code)]
//! lazyq-collections: a binary-heap priority queue, an arena-backed doubly
//! linked list with stable node handles, and a FIFO queue built on the list.
//!
//! Plain `&mut self` structures; they are not sequences themselves but
//! expose `to_seq` (and [`linked::shared_seq`] for a live view) to feed
//! pipelines.

pub mod error;
pub mod heap;
pub mod linked;
pub mod queue;

pub use error::{Error, Result};
pub use heap::PriorityQueue;
pub use linked::{shared_seq, LinkedList, NodeId};
pub use queue::Queue;
