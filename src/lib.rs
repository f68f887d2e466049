#![forbid(unsafe_code)]
//! lazyq: lazy, re-iterable query operators over in-memory sequences.
//!
//! ```
//! use lazyq::prelude::*;
//!
//! let evens: Vec<i32> = vec![5, 2, 8, 1, 4]
//!     .into_seq()
//!     .filter(|n| n % 2 == 0)
//!     .order_by(|n| *n)
//!     .to_vec();
//! assert_eq!(evens, vec![2, 4, 8]);
//! ```

pub use lazyq_collections as collections;
pub use lazyq_operators as operators;

pub use lazyq_collections::{LinkedList, NodeId, PriorityQueue, Queue};
pub use lazyq_core::{Error, IntoSeq, Result, Seq};

pub mod prelude {
    pub use lazyq_collections::{shared_seq, LinkedList, NodeId, PriorityQueue, Queue};
    pub use lazyq_operators::prelude::*;
}
