//! Error types.

use std::io;

use thiserror::Error;

/// Errors reported by a cover tree
#[derive(Debug, Error)]
pub enum CoverTreeError {
    /// The operation needs at least one point in the tree
    #[error("the cover tree is empty")]
    EmptyTree,

    /// The covering constant must be finite and at least two
    #[error("invalid covering constant {0}: must be finite and at least 2")]
    InvalidCoveringConstant(f64),

    /// A point that was expected in the tree is not stored in it
    #[error("point is not stored in the cover tree")]
    PointNotFound,

    /// Writing a dump of the tree failed
    #[error("failed to write tree dump: {0}")]
    Io(#[from] io::Error),
}

/// Shorthand for results of cover tree operations
pub type Result<T> = std::result::Result<T, CoverTreeError>;
