//! Termination based on step count.

use std::fmt::Debug;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::scope::{PhaseScope, SolverScope};

use super::Termination;

/// Terminates after a fixed number of steps.
///
/// At phase level, the phase's own step count is compared; at solver
/// level, the total step count across all phases.
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    /// Creates a termination that stops after `limit` steps.
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    /// Returns the configured limit.
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for StepCountTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.total_step_count() >= self.limit
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        phase_scope.step_count() >= self.limit
    }

    fn calculate_solver_time_gradient(&self, solver_scope: &SolverScope<S, D>) -> f64 {
        (solver_scope.total_step_count() as f64 / self.limit.max(1) as f64).min(1.0)
    }

    fn calculate_phase_time_gradient(&self, phase_scope: &PhaseScope<'_, S, D>) -> f64 {
        (phase_scope.step_count() as f64 / self.limit.max(1) as f64).min(1.0)
    }
}
