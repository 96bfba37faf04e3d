//! Benchmark run results.

use std::time::Duration;

use plancraft_core::score::Score;

/// The outcome of one solver configuration's run.
#[derive(Debug, Clone)]
pub struct BenchResult<Sc: Score> {
    /// Name of the solver configuration.
    pub name: String,
    /// Final score of the best solution found.
    pub score: Option<Sc>,
    /// Wall-clock time the run took.
    pub elapsed: Duration,
}

impl<Sc: Score> BenchResult<Sc> {
    /// Creates a new result.
    pub fn new(name: impl Into<String>, score: Option<Sc>, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            score,
            elapsed,
        }
    }
}

/// Ranks results best score first; unscored runs sort last.
pub fn rank_results<Sc: Score>(mut results: Vec<BenchResult<Sc>>) -> Vec<BenchResult<Sc>> {
    results.sort_by(|a, b| match (&a.score, &b.score) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    results
}
