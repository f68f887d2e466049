use thiserror::Error;

/// Canonical result for sequence operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Sequence contains no elements ({op})")]
    EmptySequence { op: &'static str },

    #[error("Sequence contains more than one matching element ({op})")]
    Cardinality { op: &'static str },

    #[error("Index {index} is out of range for a sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub fn empty(op: &'static str) -> Self {
        Error::EmptySequence { op }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
