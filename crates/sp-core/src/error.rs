use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index {index} out of range for profile of {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("degenerate edge set: {count} edges cannot be paired into closed segments")]
    DegenerateEdgeSet { count: usize },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
