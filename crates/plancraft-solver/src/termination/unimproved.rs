//! Termination based on lack of improvement.

use std::fmt::Debug;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::scope::{PhaseScope, SolverScope};

use super::Termination;

/// Terminates when a number of steps complete without improving the best
/// solution.
///
/// The phase terminates once
/// `last_completed_step_index - best_solution_step_index >= limit`.
/// Useful to cut a phase short when the search has plateaued.
///
/// A limit of zero terminates at the first non-improving step. Negative
/// limits are unrepresentable here; config-file limits are validated in
/// `plancraft_config` before they reach this type.
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    /// Creates a termination that stops after `limit` unimproved steps.
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    /// Returns the configured limit.
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D>
    for UnimprovedStepCountTermination
{
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        let unimproved = match solver_scope.best_solution_step_index() {
            Some(best) => solver_scope.total_step_count().saturating_sub(best),
            None => solver_scope.total_step_count(),
        };
        unimproved >= self.limit
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        phase_scope.unimproved_step_count() >= self.limit
    }

    fn calculate_solver_time_gradient(&self, solver_scope: &SolverScope<S, D>) -> f64 {
        let unimproved = match solver_scope.best_solution_step_index() {
            Some(best) => solver_scope.total_step_count().saturating_sub(best),
            None => solver_scope.total_step_count(),
        };
        (unimproved as f64 / self.limit.max(1) as f64).min(1.0)
    }

    fn calculate_phase_time_gradient(&self, phase_scope: &PhaseScope<'_, S, D>) -> f64 {
        (phase_scope.unimproved_step_count() as f64 / self.limit.max(1) as f64).min(1.0)
    }
}
