use thiserror::Error;

/// Result type local to lazyq-collections.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{collection} is empty ({op})")]
    Empty {
        collection: &'static str,
        op: &'static str,
    },

    #[error("node belongs to a different list")]
    ForeignNode,

    #[error("node handle is stale: its slot was freed or reused")]
    StaleNode,

    #[error("node is already linked into the list")]
    NodeLinked,

    #[error("node is detached from the list")]
    NodeDetached,

    #[error("cannot copy {len} items into a target of length {target} at index {index}")]
    OutOfRange {
        index: usize,
        len: usize,
        target: usize,
    },
}
