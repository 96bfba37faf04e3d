//! Phase-to-solver termination bridge.

use std::fmt::Debug;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::scope::{PhaseScope, SolverScope};

use super::Termination;

/// Adapts a solver-level termination into a phase-level one.
///
/// `is_phase_terminated` delegates to the wrapped termination's
/// `is_solver_terminated`, so a solver-wide budget also cuts the current
/// phase short.
///
/// Lifecycle events are intentionally NOT forwarded: the wrapped
/// termination already receives them directly from the top-level
/// orchestrator, and forwarding would double-count them.
///
/// Calling the bridge's own solver-level methods is a programming error
/// and panics.
#[derive(Debug, Clone, Copy)]
pub struct PhaseToSolverBridge<T> {
    inner: T,
}

impl<T> PhaseToSolverBridge<T> {
    /// Wraps a solver-level termination.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Returns the wrapped termination.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<S, D, T> Termination<S, D> for PhaseToSolverBridge<T>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    T: Termination<S, D>,
{
    fn is_solver_terminated(&self, _solver_scope: &SolverScope<S, D>) -> bool {
        panic!(
            "unsupported operation: PhaseToSolverBridge adapts a solver \
             termination to the phase level; query the wrapped termination \
             for solver-level checks"
        );
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        self.inner.is_solver_terminated(phase_scope.solver_scope())
    }

    fn calculate_solver_time_gradient(&self, _solver_scope: &SolverScope<S, D>) -> f64 {
        panic!(
            "unsupported operation: PhaseToSolverBridge adapts a solver \
             termination to the phase level; query the wrapped termination \
             for solver-level gradients"
        );
    }

    fn calculate_phase_time_gradient(&self, phase_scope: &PhaseScope<'_, S, D>) -> f64 {
        self.inner
            .calculate_solver_time_gradient(phase_scope.solver_scope())
    }

    // Lifecycle events stay with the orchestrator-owned termination;
    // forwarding here would deliver them twice.
    fn phase_started(&mut self, _phase_scope: &PhaseScope<'_, S, D>) {}
    fn step_ended(&mut self, _phase_scope: &PhaseScope<'_, S, D>) {}
    fn phase_ended(&mut self, _phase_scope: &PhaseScope<'_, S, D>) {}
}
