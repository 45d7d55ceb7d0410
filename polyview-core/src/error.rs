//! Error types for polyview geometry operations

use thiserror::Error;

/// Errors raised by vector math and face construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid face: expected at least 3 vertices, got {count}")]
    InvalidFace { count: usize },

    #[error("division by zero")]
    DivideByZero,

    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    #[error("vertex index {index} out of range for pool of {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("face {face} is wound with its normal pointing into the solid")]
    InconsistentWinding { face: usize },
}

/// Result type alias for polyview geometry operations
pub type Result<T> = std::result::Result<T, Error>;
