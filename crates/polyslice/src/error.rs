use thiserror::Error;

/// Errors raised while building boundaries or splitting them along a cut.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SliceError {
    #[error("boundary needs at least 3 vertices, got {count}")]
    InvalidBoundary { count: usize },

    #[error("vertex {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    #[error("edge {index} has zero length")]
    DegenerateEdge { index: usize },

    #[error("boundary crossing could not be resolved")]
    UnresolvedCrossing,

    #[error("cut has no entry edge")]
    MissingEntry,

    #[error("edge {index} is out of range for a boundary of {len} edges")]
    EdgeOutOfRange { index: usize, len: usize },
}
