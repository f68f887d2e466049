#![forbid(unsafe_code)]
//! lazyq-core: the sequence contract, key groups, comparers, configuration
//! and the error taxonomy shared by every lazyq crate.
//!
//! Keep this crate free of operators; `lazyq-operators` builds every
//! pipeline stage on top of [`Seq`] through extension traits.

pub mod compare;
pub mod config;
pub mod error;
pub mod group;
pub mod prelude;
pub mod sequence;
pub mod source;

pub use error::{Error, Result};
pub use sequence::{IntoSeq, Seq};
