//! Population evaluation: individuals -> behaviors -> novelty scores.
//!
//! Three fan-out/fan-in stages, each order-preserving so result *i* always
//! corresponds to input *i*:
//! 1. the domain evaluation function over every individual, on the bounded
//!    worker pool (user code; may fail or stall, so it gets a deadline);
//! 2. behavior characterization over every result (pure, rayon);
//! 3. novelty scoring of every behavior against the full batch plus the
//!    archive (pure, rayon).
//!
//! A failing or timed-out individual aborts the whole batch: each score
//! depends on the entire batch, so partial results are meaningless. The
//! batch ends with a single `update_archive` call.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rayon::prelude::*;

use crate::behavior::{Behavior, BehaviorFn};
use crate::engine::NoveltyEngine;
use crate::error::{CoreError, Result};
use crate::pool;

/// Options for one evaluation batch.
#[derive(Clone, Debug)]
pub struct EvaluateOpts {
    /// Per-task deadline for the domain evaluation stage.
    pub timeout: Duration,
    /// Worker count; defaults to available hardware parallelism.
    pub workers: Option<usize>,
}

impl Default for EvaluateOpts {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            workers: None,
        }
    }
}

impl EvaluateOpts {
    fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }
}

/// Evaluates a population and folds the batch into the archive.
///
/// Returns the per-individual novelty scores (index-aligned with
/// `population`) and the engine extended with this batch's admissions.
/// The engine argument is untouched; callers replace it with the returned
/// value to advance a run.
pub fn evaluate_population<I, R, F>(
    engine: &NoveltyEngine,
    population: Vec<I>,
    eval_fn: Arc<F>,
    extractor: BehaviorFn<R>,
    opts: &EvaluateOpts,
) -> Result<(Vec<f64>, NoveltyEngine)>
where
    I: Send + 'static,
    R: Send + Sync + 'static,
    F: Fn(&I) -> anyhow::Result<R> + Send + Sync + ?Sized + 'static,
{
    let batch = population.len();

    // Stage 1: domain evaluation, deadline-bounded.
    let results = pool::map_indexed(
        population,
        Arc::new(move |index, individual: &I| {
            eval_fn(individual).map_err(|source| CoreError::Evaluation { index, source })
        }),
        opts.worker_count(),
        opts.timeout,
    )?;

    // Stage 2: behavior characterization.
    let behaviors: Vec<Behavior> = results.par_iter().map(|r| extractor(r)).collect();

    // Stage 3: novelty scoring against the full batch + archive.
    let scores: Vec<f64> = behaviors
        .par_iter()
        .map(|b| engine.novelty_score(b, &behaviors))
        .collect();

    let engine = engine.update_archive(&behaviors, &scores)?;
    tracing::debug!(
        batch,
        archive_size = engine.archive_stats().size,
        "population evaluated"
    );
    Ok((scores, engine))
}
