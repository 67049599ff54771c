use thiserror::Error;

/// Crate-wide error type.
///
/// All failures are detected synchronously at the point of violation and
/// propagate immediately; there is no retry or partial-result recovery.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("invalid hyperedge at position {0}: hyperedges must be non-empty")]
    InvalidHyperedge(usize),

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("linear algebra failure: {0}")]
    Linalg(String),
}

pub type Result<T> = std::result::Result<T, Error>;
