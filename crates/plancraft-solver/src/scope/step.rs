//! Step-level scope.

use rand_chacha::ChaCha8Rng;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use super::PhaseScope;

/// Scope for a single step within a phase.
pub struct StepScope<'a, 'b, S: PlanningSolution, D: ScoreDirector<S>> {
    phase_scope: &'a mut PhaseScope<'b, S, D>,
    /// Index of this step within the phase (0-based).
    step_index: u64,
    /// Score of the winning move, once one is selected.
    step_score: Option<S::Score>,
    /// Number of candidate moves evaluated during this step.
    selected_move_count: u64,
}

impl<'a, 'b, S: PlanningSolution, D: ScoreDirector<S>> StepScope<'a, 'b, S, D> {
    /// Creates a new step scope.
    pub fn new(phase_scope: &'a mut PhaseScope<'b, S, D>) -> Self {
        let step_index = phase_scope.step_count();
        Self {
            phase_scope,
            step_index,
            step_score: None,
            selected_move_count: 0,
        }
    }

    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    pub fn step_score(&self) -> Option<&S::Score> {
        self.step_score.as_ref()
    }

    pub fn set_step_score(&mut self, score: S::Score) {
        self.step_score = Some(score);
    }

    pub fn selected_move_count(&self) -> u64 {
        self.selected_move_count
    }

    pub fn set_selected_move_count(&mut self, count: u64) {
        self.selected_move_count = count;
    }

    /// Marks this step as complete and advances the phase counters.
    pub fn complete(&mut self) {
        self.phase_scope.complete_step(self.step_index);
    }

    pub fn phase_scope(&self) -> &PhaseScope<'b, S, D> {
        self.phase_scope
    }

    pub fn phase_scope_mut(&mut self) -> &mut PhaseScope<'b, S, D> {
        self.phase_scope
    }

    pub fn score_director(&self) -> &D {
        self.phase_scope.score_director()
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        self.phase_scope.score_director_mut()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.phase_scope.calculate_score()
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        self.phase_scope.solver_scope_mut().rng()
    }

    /// Cooperative stop signal, also polled between candidate evaluations.
    pub fn is_terminate_early(&self) -> bool {
        self.phase_scope.solver_scope().is_terminate_early()
    }
}
