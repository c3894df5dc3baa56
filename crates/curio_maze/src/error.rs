//! Error types for maze construction.

use thiserror::Error;

/// Errors from parsing a textual maze layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Layout contained no printable cells.
    #[error("maze layout is empty")]
    Empty,

    /// No `S` cell in the layout.
    #[error("maze layout has no start cell ('S')")]
    MissingStart,

    /// No `G` cell in the layout.
    #[error("maze layout has no goal cell ('G')")]
    MissingGoal,

    /// More than one `S` cell.
    #[error("maze layout has more than one start cell ('S')")]
    DuplicateStart,

    /// More than one `G` cell.
    #[error("maze layout has more than one goal cell ('G')")]
    DuplicateGoal,
}

/// Result type alias for maze operations.
pub type Result<T> = std::result::Result<T, MazeError>;
