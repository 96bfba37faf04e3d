//! Phase-level scope.

use std::time::Instant;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use super::SolverScope;

/// Scope for a single phase of solving.
///
/// Tracks the phase's step counters, including the indices that feed
/// unimproved-step terminations. Lives only for the duration of the phase.
pub struct PhaseScope<'a, S: PlanningSolution, D: ScoreDirector<S>> {
    solver_scope: &'a mut SolverScope<S, D>,
    phase_index: usize,
    starting_score: Option<S::Score>,
    step_count: u64,
    /// Index of the last step that ran to completion.
    last_completed_step_index: Option<u64>,
    /// Index of the step that last improved the best solution.
    best_solution_step_index: Option<u64>,
    start_time: Instant,
}

impl<'a, S: PlanningSolution, D: ScoreDirector<S>> PhaseScope<'a, S, D> {
    /// Creates a new phase scope.
    pub fn new(solver_scope: &'a mut SolverScope<S, D>, phase_index: usize) -> Self {
        let starting_score = solver_scope.best_score().copied();
        Self {
            solver_scope,
            phase_index,
            starting_score,
            step_count: 0,
            last_completed_step_index: None,
            best_solution_step_index: None,
            start_time: Instant::now(),
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn starting_score(&self) -> Option<&S::Score> {
        self.starting_score.as_ref()
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn last_completed_step_index(&self) -> Option<u64> {
        self.last_completed_step_index
    }

    pub fn best_solution_step_index(&self) -> Option<u64> {
        self.best_solution_step_index
    }

    pub fn set_best_solution_step_index(&mut self, step_index: u64) {
        self.best_solution_step_index = Some(step_index);
    }

    /// Number of completed steps since the best solution last improved.
    pub fn unimproved_step_count(&self) -> u64 {
        match (self.last_completed_step_index, self.best_solution_step_index) {
            (Some(last), Some(best)) => last.saturating_sub(best),
            // Steps completed but nothing ever improved.
            (Some(last), None) => last + 1,
            _ => 0,
        }
    }

    /// Marks a step as completed.
    pub fn complete_step(&mut self, step_index: u64) {
        self.last_completed_step_index = Some(step_index);
        self.step_count += 1;
        self.solver_scope.increment_step_count();
    }

    pub fn solver_scope(&self) -> &SolverScope<S, D> {
        self.solver_scope
    }

    pub fn solver_scope_mut(&mut self) -> &mut SolverScope<S, D> {
        self.solver_scope
    }

    pub fn score_director(&self) -> &D {
        self.solver_scope.score_director()
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        self.solver_scope.score_director_mut()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.solver_scope.calculate_score()
    }
}
