//! Error types for curio_core.
//!
//! Configuration errors (mismatched inputs) and evaluation errors (a failing
//! or stalled individual) both abort the operation that hit them; the core
//! never retries.

use std::time::Duration;
use thiserror::Error;

/// Main error type for novelty-engine operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Behavior and score sequences must pair positionally.
    #[error("length mismatch: {behaviors} behaviors vs {scores} scores")]
    LengthMismatch { behaviors: usize, scores: usize },

    /// An individual's evaluation function returned an error.
    #[error("evaluation of individual {index} failed: {source}")]
    Evaluation {
        index: usize,
        source: anyhow::Error,
    },

    /// An individual's evaluation did not complete within the deadline.
    #[error("evaluation of individual {index} timed out after {waited:?}")]
    Timeout { index: usize, waited: Duration },
}

/// Result type alias for curio_core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let err = CoreError::LengthMismatch {
            behaviors: 3,
            scores: 2,
        };
        assert_eq!(err.to_string(), "length mismatch: 3 behaviors vs 2 scores");
    }

    #[test]
    fn test_evaluation_error_names_individual() {
        let err = CoreError::Evaluation {
            index: 7,
            source: anyhow::anyhow!("controller panicked"),
        };
        assert!(err.to_string().contains("individual 7"));
        assert!(err.to_string().contains("controller panicked"));
    }
}
