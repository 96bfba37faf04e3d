//! Solver phases.

pub mod construction;
pub mod localsearch;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::scope::SolverScope;

/// One phase of the solving pipeline.
///
/// Phases run in configuration order; each drives its own step loop and
/// consults its termination and the best-solution recaller after every
/// step.
pub trait Phase<S: PlanningSolution, D: ScoreDirector<S>>: Send {
    /// Runs this phase against the working solution.
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>);

    /// Returns the phase type name for diagnostics.
    fn phase_type_name(&self) -> &'static str;
}
