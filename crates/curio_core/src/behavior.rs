//! Behavior vectors and the characterization contract.
//!
//! A behavior vector is a fixed-length numeric summary of what an individual
//! *did* during evaluation, as opposed to how well it scored. Extractors map
//! an arbitrary domain evaluation result to such a vector; they are plain
//! function values so domains can swap strategies (final position, trajectory
//! sub-sampling, occupancy histograms, ...) without touching the engine.

use std::sync::Arc;

/// Ordered, fixed-length sequence of reals. Only metric distance matters;
/// identity and equality are irrelevant. Immutable once produced.
pub type Behavior = Vec<f64>;

/// Behavior characterization: evaluation result -> behavior vector.
///
/// The result type `R` is whatever the domain's evaluation function emits;
/// the extractor is the only piece of the pipeline that understands it.
pub type BehaviorFn<R> = Arc<dyn Fn(&R) -> Behavior + Send + Sync>;

/// The identity characterization, for domains whose evaluation function
/// already yields a behavior vector.
#[must_use]
pub fn identity_behavior() -> BehaviorFn<Behavior> {
    Arc::new(|b| b.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_behavior_passes_through() {
        let f = identity_behavior();
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(f(&b), b);
    }

    #[test]
    fn test_extractor_can_project_arbitrary_results() {
        struct Outcome {
            x: f64,
            y: f64,
            steps: usize,
        }
        let f: BehaviorFn<Outcome> = Arc::new(|o| vec![o.x, o.y]);
        let outcome = Outcome {
            x: 4.0,
            y: -1.0,
            steps: 120,
        };
        assert_eq!(f(&outcome), vec![4.0, -1.0]);
        assert_eq!(outcome.steps, 120);
    }
}
