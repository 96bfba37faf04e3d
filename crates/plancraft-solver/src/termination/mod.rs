//! Termination conditions for solver and phases.
//!
//! A termination is polymorphic over both scopes: it can answer whether
//! the solver or the current phase should stop, and can estimate progress
//! as a time gradient in `[0, 1]`. Terminations are polled cooperatively
//! at step boundaries; there is no preemptive cancellation.

mod bridge;
mod composite;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::scope::{PhaseScope, SolverScope};

pub use bridge::PhaseToSolverBridge;
pub use composite::{AndTermination, OrTermination};
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedStepCountTermination;

/// Returned by the gradient methods when a termination cannot estimate
/// progress.
pub const UNSUPPORTED_TIME_GRADIENT: f64 = -1.0;

/// Decides when to stop solving.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `D` - The score director type
pub trait Termination<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    /// Returns true if the whole solve should stop.
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool;

    /// Returns true if the current phase should stop.
    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool;

    /// Estimates solve progress in `[0, 1]`, or
    /// [`UNSUPPORTED_TIME_GRADIENT`] when unknown.
    fn calculate_solver_time_gradient(&self, _solver_scope: &SolverScope<S, D>) -> f64 {
        UNSUPPORTED_TIME_GRADIENT
    }

    /// Estimates phase progress in `[0, 1]`, or
    /// [`UNSUPPORTED_TIME_GRADIENT`] when unknown.
    fn calculate_phase_time_gradient(&self, _phase_scope: &PhaseScope<'_, S, D>) -> f64 {
        UNSUPPORTED_TIME_GRADIENT
    }

    /// Called when a phase starts.
    fn phase_started(&mut self, _phase_scope: &PhaseScope<'_, S, D>) {}

    /// Called after every completed step.
    fn step_ended(&mut self, _phase_scope: &PhaseScope<'_, S, D>) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self, _phase_scope: &PhaseScope<'_, S, D>) {}
}

/// A termination that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for NoTermination {
    fn is_solver_terminated(&self, _solver_scope: &SolverScope<S, D>) -> bool {
        false
    }

    fn is_phase_terminated(&self, _phase_scope: &PhaseScope<'_, S, D>) -> bool {
        false
    }
}
