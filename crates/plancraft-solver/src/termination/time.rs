//! Termination based on elapsed wall-clock time.

use std::fmt::Debug;
use std::time::Duration;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::scope::{PhaseScope, SolverScope};

use super::Termination;

/// Terminates after a wall-clock time budget is spent.
///
/// At phase level, the phase's own elapsed time is compared; at solver
/// level, the time since solving started.
#[derive(Debug, Clone, Copy)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    /// Creates a termination with the given time budget.
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    /// Creates a termination with a budget in seconds.
    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Creates a termination with a budget in milliseconds.
    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    fn gradient(&self, elapsed: Duration) -> f64 {
        if elapsed >= self.limit {
            return 1.0;
        }
        let limit_ms = self.limit.as_millis().max(1) as f64;
        (elapsed.as_millis() as f64 / limit_ms).min(1.0)
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for TimeTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope
            .elapsed()
            .is_some_and(|elapsed| elapsed >= self.limit)
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        phase_scope.elapsed() >= self.limit
    }

    fn calculate_solver_time_gradient(&self, solver_scope: &SolverScope<S, D>) -> f64 {
        match solver_scope.elapsed() {
            Some(elapsed) => self.gradient(elapsed),
            None => 0.0,
        }
    }

    fn calculate_phase_time_gradient(&self, phase_scope: &PhaseScope<'_, S, D>) -> f64 {
        self.gradient(phase_scope.elapsed())
    }
}
