//! Convenient re-exports for downstream crates.

pub use crate::compare::{default_compare, Comparer, EqualityComparer, KeySelector};
pub use crate::config::QueryConfig;
pub use crate::error::{Error, Result};
pub use crate::group::KeyGroup;
pub use crate::sequence::{IntoSeq, Seq, SeqCursor};
pub use crate::source::IndexedSource;
