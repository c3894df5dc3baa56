//! Bounded worker pool for the evaluation fan-out.
//!
//! Rayon covers the pure stages of the pipeline, but the domain evaluation
//! stage runs arbitrary user code that may stall, and a stalled `par_iter`
//! cannot be abandoned. This pool trades scoped threads for detached ones:
//! workers pull `(index, input)` tasks from a shared queue and report over a
//! channel, the collector re-orders by index and enforces a deadline with
//! `recv_timeout`. On timeout the batch fails with the index of a
//! still-pending input and the stalled thread is simply abandoned.
//!
//! The deadline is per task, measured as the maximum gap between successive
//! completions; with at least as many workers as pending tasks that bounds
//! every individual evaluation.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::error::{CoreError, Result};

/// Applies `f` to every input on `workers` threads, restoring input order.
///
/// Returns the first failure instead of partial output: either the error `f`
/// produced for some index, or `CoreError::Timeout` when no completion
/// arrived within `timeout`.
pub fn map_indexed<I, T, F>(
    inputs: Vec<I>,
    f: Arc<F>,
    workers: usize,
    timeout: Duration,
) -> Result<Vec<T>>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(usize, &I) -> Result<T> + Send + Sync + 'static,
{
    let total = inputs.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let queue: Arc<Mutex<VecDeque<(usize, I)>>> =
        Arc::new(Mutex::new(inputs.into_iter().enumerate().collect()));
    let (tx, rx) = mpsc::channel::<(usize, Result<T>)>();

    for _ in 0..workers.clamp(1, total) {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        let f = Arc::clone(&f);
        thread::spawn(move || loop {
            let task = queue
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front();
            let Some((index, input)) = task else {
                break;
            };
            if tx.send((index, f(index, &input))).is_err() {
                // Collector gave up (error or timeout); drain no further.
                break;
            }
        });
    }
    drop(tx);

    let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
    let mut completed = 0usize;
    while completed < total {
        match rx.recv_timeout(timeout) {
            Ok((index, Ok(value))) => {
                slots[index] = Some(value);
                completed += 1;
            }
            Ok((_, Err(err))) => return Err(err),
            Err(_) => {
                let index = slots
                    .iter()
                    .position(|slot| slot.is_none())
                    .unwrap_or(total - 1);
                return Err(CoreError::Timeout {
                    index,
                    waited: timeout,
                });
            }
        }
    }

    Ok(slots
        .into_iter()
        .map(|slot| slot.expect("completed == total fills every slot"))
        .collect())
}
