#![forbid(unsafe_code)]
//! lazyq-operators: pipeline stages, consumers, ordering, set algebra,
//! joins and grouping over [`lazyq_core::Seq`].
//!
//! Design intent:
//! - Every operator is an extension-trait method on `Seq<T>`; import the
//!   [`prelude`] to get all of them.
//! - Operators that must see their whole input (ordering, joins, `intersect`,
//!   `except`, `xor`, grouping) buffer it only when the first element is
//!   pulled, and rebuild the buffer for every new cursor.
//! - Nothing here holds state across cursors, so a pipeline can be iterated
//!   any number of times.

pub mod consume;
pub mod group;
pub mod pipeline;

pub mod join;
pub mod set;
pub mod sort;

pub use consume::Consume;
pub use group::{Grouping, Lookup};
pub use join::Join;
pub use pipeline::Pipeline;
pub use set::SetAlgebra;
pub use sort::{OrderBy, OrderedSeq};

pub mod prelude {
    pub use crate::{Consume, Grouping, Join, Lookup, OrderBy, OrderedSeq, Pipeline, SetAlgebra};
    pub use lazyq_core::prelude::*;
}
