//! # Curio Core
//!
//! The novelty-search engine: an archive of previously seen behaviors and a
//! k-nearest-neighbor novelty metric computed against it.
//!
//! Instead of rewarding task fitness, novelty search rewards individuals for
//! ending up somewhere behavior space has not been before. This crate owns:
//! - **Behavior vectors**: fixed-length numeric summaries of what an
//!   individual *did*
//! - **Distance metrics**: pluggable behavior-space metrics (Euclidean
//!   default)
//! - **The archive**: behaviors deemed novel enough to remember, kept
//!   mutually separated by a minimum distance
//! - **Population evaluation**: a parallel three-stage pipeline from raw
//!   individuals to novelty scores
//!
//! The engine has value semantics: archive updates return a new engine, so
//! concurrent runs are isolated by construction.
//!
//! ## Example
//!
//! ```
//! use curio_core::{NoveltyConfig, NoveltyEngine};
//!
//! let engine = NoveltyEngine::new(NoveltyConfig {
//!     k_nearest: 3,
//!     archive_threshold: 5.0,
//!     min_dist_to_archive: 2.0,
//!     ..NoveltyConfig::default()
//! });
//!
//! let batch = vec![vec![0.0, 0.0], vec![10.0, 10.0]];
//! let score = engine.novelty_score(&batch[0], &batch);
//! assert!(score > 0.0);
//! ```

/// Behavior vectors and the extractor contract
pub mod behavior;
/// Pluggable behavior-space distance metrics
pub mod distance;
/// The novelty engine: archive ownership, scoring, admission
pub mod engine;
/// Error taxonomy for configuration and evaluation failures
pub mod error;
/// Population evaluation pipeline (fan-out / fan-in)
pub mod evaluate;
/// Bounded worker pool with per-task deadlines
pub mod pool;

pub use behavior::{identity_behavior, Behavior, BehaviorFn};
pub use distance::DistanceMetric;
pub use engine::{ArchiveStats, NoveltyConfig, NoveltyEngine};
pub use error::{CoreError, Result};
pub use evaluate::{evaluate_population, EvaluateOpts};
