//! The novelty engine: archive ownership, k-NN scoring, greedy admission.
//!
//! The engine is a value. `update_archive` and `clear_archive` return a new
//! engine instead of mutating the receiver, which keeps scoring free of
//! aliasing and lets concurrent runs hold independent archives.

use std::cmp::Ordering;

use serde::Serialize;

use crate::behavior::Behavior;
use crate::distance::DistanceMetric;
use crate::error::{CoreError, Result};

/// Configuration for one engine instance. Immutable for its lifetime.
#[derive(Clone, Debug)]
pub struct NoveltyConfig {
    /// Number of nearest neighbors averaged into a novelty score.
    pub k_nearest: usize,
    /// Minimum score for a behavior to be archive-eligible.
    pub archive_threshold: f64,
    /// Minimum separation from every existing archive member.
    pub min_dist_to_archive: f64,
    /// Behavior-space metric.
    pub distance: DistanceMetric,
    /// When scoring against a pool that contains the query itself, drop one
    /// exact-zero distance before the k-NN cut. Defaults to `false`: the
    /// historical behavior lets the zero self-distance occupy one of the k
    /// slots, which deflates scores for small populations.
    pub self_exclusion: bool,
}

impl Default for NoveltyConfig {
    fn default() -> Self {
        Self {
            k_nearest: 15,
            archive_threshold: 6.0,
            min_dist_to_archive: 3.0,
            distance: DistanceMetric::Euclidean,
            self_exclusion: false,
        }
    }
}

/// Read-only snapshot of the archive.
#[derive(Clone, Debug, Serialize)]
pub struct ArchiveStats {
    pub size: usize,
    pub behaviors: Vec<Behavior>,
}

/// Owns the archive of historically novel behaviors and scores candidates
/// against it.
#[derive(Clone, Debug)]
pub struct NoveltyEngine {
    config: NoveltyConfig,
    archive: Vec<Behavior>,
}

impl Default for NoveltyEngine {
    fn default() -> Self {
        Self::new(NoveltyConfig::default())
    }
}

impl NoveltyEngine {
    /// Creates an engine with an empty archive.
    #[must_use]
    pub fn new(config: NoveltyConfig) -> Self {
        Self {
            config,
            archive: Vec::new(),
        }
    }

    /// Creates an engine with a pre-seeded archive (e.g. resumed runs).
    #[must_use]
    pub fn with_archive(config: NoveltyConfig, archive: Vec<Behavior>) -> Self {
        Self { config, archive }
    }

    #[must_use]
    pub fn config(&self) -> &NoveltyConfig {
        &self.config
    }

    /// Average distance from `behavior` to its k nearest neighbors in
    /// archive + population. Returns 0.0 when the combined pool is empty.
    ///
    /// If `population` contains the queried behavior itself, its zero
    /// self-distance enters the pool unless `self_exclusion` is set.
    #[must_use]
    pub fn novelty_score(&self, behavior: &[f64], population: &[Behavior]) -> f64 {
        let mut dists: Vec<f64> = self
            .archive
            .iter()
            .chain(population.iter())
            .map(|other| self.config.distance.measure(behavior, other))
            .collect();

        if self.config.self_exclusion {
            // Drop at most one zero so a genuine duplicate still counts once.
            if let Some(pos) = dists.iter().position(|d| *d == 0.0) {
                dists.swap_remove(pos);
            }
        }

        if dists.is_empty() {
            return 0.0;
        }

        dists.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let k = self.config.k_nearest.min(dists.len());
        dists[..k].iter().sum::<f64>() / k as f64
    }

    /// Folds a scored batch into the archive and returns the extended engine.
    ///
    /// Behaviors pair with scores positionally; mismatched lengths are a
    /// contract violation and fail fast. Candidates above `archive_threshold`
    /// are considered in descending-score order (stable, so ties keep their
    /// batch order) and admitted greedily: a candidate enters only if it is
    /// at least `min_dist_to_archive` away from every member already present,
    /// including ones admitted earlier in the same call. Higher-scoring
    /// candidates can therefore block nearby lower-scoring ones.
    pub fn update_archive(&self, behaviors: &[Behavior], scores: &[f64]) -> Result<Self> {
        if behaviors.len() != scores.len() {
            return Err(CoreError::LengthMismatch {
                behaviors: behaviors.len(),
                scores: scores.len(),
            });
        }

        let mut candidates: Vec<(&Behavior, f64)> = behaviors
            .iter()
            .zip(scores.iter().copied())
            .filter(|(_, score)| *score > self.config.archive_threshold)
            .collect();
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let considered = candidates.len();
        let mut archive = self.archive.clone();
        let mut admitted = 0usize;
        for (candidate, score) in candidates {
            let separated = archive
                .iter()
                .all(|member| {
                    self.config.distance.measure(candidate, member)
                        >= self.config.min_dist_to_archive
                });
            if separated {
                tracing::debug!(score, dims = candidate.len(), "behavior admitted to archive");
                archive.push(candidate.clone());
                admitted += 1;
            }
        }

        tracing::debug!(
            batch = behaviors.len(),
            considered,
            admitted,
            archive_size = archive.len(),
            "archive update"
        );

        Ok(Self {
            config: self.config.clone(),
            archive,
        })
    }

    /// Read-only view of the archive contents.
    #[must_use]
    pub fn archive_stats(&self) -> ArchiveStats {
        ArchiveStats {
            size: self.archive.len(),
            behaviors: self.archive.clone(),
        }
    }

    /// Returns a new engine with the same config and an empty archive.
    #[must_use]
    pub fn clear_archive(&self) -> Self {
        Self {
            config: self.config.clone(),
            archive: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(k: usize, threshold: f64, min_dist: f64) -> NoveltyEngine {
        NoveltyEngine::new(NoveltyConfig {
            k_nearest: k,
            archive_threshold: threshold,
            min_dist_to_archive: min_dist,
            ..NoveltyConfig::default()
        })
    }

    #[test]
    fn test_novelty_score_empty_pool_is_zero() {
        let e = engine(15, 6.0, 3.0);
        assert_eq!(e.novelty_score(&[1.0, 2.0], &[]), 0.0);
    }

    #[test]
    fn test_novelty_score_k3_mean_of_three_smallest() {
        let e = engine(3, 6.0, 3.0);
        let pool = vec![
            vec![0.0, 0.0],
            vec![10.0, 10.0],
            vec![3.0, 3.0],
            vec![7.0, 7.0],
            vec![1.0, 1.0],
        ];
        let score = e.novelty_score(&[5.0, 5.0], &pool);

        // Distances from (5,5): sqrt(50), sqrt(50), sqrt(8), sqrt(8), sqrt(32).
        let expected = (8.0f64.sqrt() + 8.0f64.sqrt() + 32.0f64.sqrt()) / 3.0;
        assert!(
            (score - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            score
        );
        assert!(score > 0.0 && score < 10.0);
    }

    #[test]
    fn test_novelty_score_uses_fewer_neighbors_than_k_when_pool_small() {
        let e = engine(15, 6.0, 3.0);
        let pool = vec![vec![3.0, 4.0]];
        let score = e.novelty_score(&[0.0, 0.0], &pool);
        assert!((score - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_novelty_score_self_distance_deflates_by_default() {
        let e = engine(2, 6.0, 3.0);
        let pool = vec![vec![0.0, 0.0], vec![4.0, 0.0]];
        // Pool contains the query itself: distances {0, 4}, mean 2.
        let score = e.novelty_score(&[0.0, 0.0], &pool);
        assert!((score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_novelty_score_self_exclusion_drops_one_zero() {
        let e = NoveltyEngine::new(NoveltyConfig {
            k_nearest: 2,
            self_exclusion: true,
            ..NoveltyConfig::default()
        });
        let pool = vec![vec![0.0, 0.0], vec![4.0, 0.0]];
        let score = e.novelty_score(&[0.0, 0.0], &pool);
        assert!((score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_archive_threshold_and_separation() {
        let e = engine(15, 5.0, 2.0);
        let behaviors = vec![vec![0.0, 0.0], vec![10.0, 10.0], vec![5.0, 5.0]];
        let scores = vec![3.0, 7.0, 6.0];

        let updated = e.update_archive(&behaviors, &scores).unwrap();
        let stats = updated.archive_stats();

        assert_eq!(stats.size, 2);
        assert!(stats.behaviors.contains(&vec![10.0, 10.0]));
        assert!(stats.behaviors.contains(&vec![5.0, 5.0]));
        for (i, a) in stats.behaviors.iter().enumerate() {
            for b in stats.behaviors.iter().skip(i + 1) {
                assert!(DistanceMetric::Euclidean.measure(a, b) >= 2.0);
            }
        }
    }

    #[test]
    fn test_update_archive_existing_member_blocks_candidate() {
        let e = NoveltyEngine::with_archive(
            NoveltyConfig {
                archive_threshold: 1.0,
                min_dist_to_archive: 5.0,
                ..NoveltyConfig::default()
            },
            vec![vec![0.0, 0.0]],
        );
        let behaviors = vec![vec![1.0, 1.0], vec![10.0, 10.0]];
        let scores = vec![8.0, 9.0];

        let updated = e.update_archive(&behaviors, &scores).unwrap();
        let stats = updated.archive_stats();

        assert_eq!(stats.size, 2, "seed plus the far candidate");
        assert!(stats.behaviors.contains(&vec![10.0, 10.0]));
        assert!(!stats.behaviors.contains(&vec![1.0, 1.0]));
    }

    #[test]
    fn test_update_archive_higher_score_blocks_lower() {
        let e = engine(15, 1.0, 3.0);
        // Both qualify on threshold; they are within 3.0 of each other, so
        // the higher-scoring one wins and blocks the other.
        let behaviors = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        let scores = vec![2.0, 9.0];

        let updated = e.update_archive(&behaviors, &scores).unwrap();
        let stats = updated.archive_stats();

        assert_eq!(stats.size, 1);
        assert_eq!(stats.behaviors[0], vec![1.0, 0.0]);
    }

    #[test]
    fn test_update_archive_is_idempotent_for_archived_batch() {
        let e = engine(15, 5.0, 2.0);
        let behaviors = vec![vec![0.0, 0.0], vec![10.0, 10.0]];
        let scores = vec![6.0, 8.0];

        let once = e.update_archive(&behaviors, &scores).unwrap();
        let twice = once.update_archive(&behaviors, &scores).unwrap();

        assert_eq!(once.archive_stats().size, 2);
        assert_eq!(
            twice.archive_stats().size,
            2,
            "re-submitting archived behaviors must not grow the archive"
        );
    }

    #[test]
    fn test_update_archive_length_mismatch_fails_fast() {
        let e = engine(15, 6.0, 3.0);
        let err = e
            .update_archive(&[vec![0.0, 0.0]], &[1.0, 2.0])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::LengthMismatch {
                behaviors: 1,
                scores: 2
            }
        ));
    }

    #[test]
    fn test_update_archive_does_not_mutate_receiver() {
        let e = engine(15, 1.0, 0.5);
        let _updated = e
            .update_archive(&[vec![50.0, 50.0]], &[100.0])
            .unwrap();
        assert_eq!(e.archive_stats().size, 0, "receiver must stay unchanged");
    }

    #[test]
    fn test_clear_archive_returns_fresh_engine() {
        let e = engine(15, 1.0, 0.5);
        let filled = e.update_archive(&[vec![5.0, 5.0]], &[10.0]).unwrap();
        assert_eq!(filled.archive_stats().size, 1);

        let cleared = filled.clear_archive();
        assert_eq!(cleared.archive_stats().size, 0);
        assert_eq!(filled.archive_stats().size, 1);
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let cfg = NoveltyConfig::default();
        assert_eq!(cfg.k_nearest, 15);
        assert_eq!(cfg.archive_threshold, 6.0);
        assert_eq!(cfg.min_dist_to_archive, 3.0);
        assert!(!cfg.self_exclusion);
    }
}
