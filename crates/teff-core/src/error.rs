//! Error types for trigeff

use thiserror::Error;

/// trigeff error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// ROOT file access error (wrapped; the underlying error types are not public)
    #[error("ROOT error: {0}")]
    Root(String),

    /// A requested branch does not exist in the tree. The aggregator matches
    /// on this variant to drop the file and keep going.
    #[error("missing branch '{0}'")]
    MissingBranch(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
