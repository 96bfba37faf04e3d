//! Parallel benchmark runner.
//!
//! Runs several independent solver configurations against their own
//! problem instances. Each run owns its solution and shares no mutable
//! state with its siblings, so runs parallelize freely across a bounded
//! worker pool.

use std::time::Instant;

use rayon::prelude::*;

use plancraft_core::domain::PlanningSolution;

use crate::result::BenchResult;

/// One named solver configuration to benchmark.
///
/// The factory closure builds and runs a complete solve, returning the
/// best solution; it is invoked once, on a worker thread.
pub struct BenchCandidate<S, F>
where
    S: PlanningSolution,
    F: Fn() -> S + Send + Sync,
{
    name: String,
    run: F,
}

impl<S, F> BenchCandidate<S, F>
where
    S: PlanningSolution,
    F: Fn() -> S + Send + Sync,
{
    /// Creates a named candidate.
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }
}

/// Runs candidates across a bounded rayon pool.
#[derive(Debug, Clone, Copy)]
pub struct BenchRunner {
    parallelism: usize,
}

impl BenchRunner {
    /// Creates a runner with the requested parallelism, reduced to the
    /// available hardware concurrency when it exceeds it.
    pub fn new(requested_parallelism: usize) -> Self {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let parallelism = requested_parallelism.clamp(1, available);
        if parallelism < requested_parallelism {
            tracing::debug!(
                requested = requested_parallelism,
                available,
                "Reducing bench parallelism to available hardware concurrency"
            );
        }
        Self { parallelism }
    }

    /// Creates a runner sized to the available hardware concurrency.
    pub fn from_available_parallelism() -> Self {
        Self::new(usize::MAX)
    }

    /// Returns the effective parallelism.
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Runs every candidate and collects results in candidate order.
    pub fn run_all<S, F>(&self, candidates: Vec<BenchCandidate<S, F>>) -> Vec<BenchResult<S::Score>>
    where
        S: PlanningSolution,
        F: Fn() -> S + Send + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism)
            .build()
            .expect("bench thread pool");

        pool.install(|| {
            candidates
                .par_iter()
                .map(|candidate| {
                    let start = Instant::now();
                    let solution = (candidate.run)();
                    let elapsed = start.elapsed();
                    tracing::debug!(
                        name = %candidate.name,
                        score = ?solution.score(),
                        ?elapsed,
                        "Bench run finished"
                    );
                    BenchResult::new(candidate.name.clone(), solution.score(), elapsed)
                })
                .collect()
        })
    }
}
