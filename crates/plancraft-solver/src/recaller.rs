//! Best-solution recall.

use plancraft_config::EnvironmentMode;
use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::scope::PhaseScope;

/// Tracks the best solution found so far.
///
/// Consulted after every step: a strictly better step score snapshots the
/// working solution and records the step index (which feeds
/// unimproved-step terminations). At the end of solving the snapshot is
/// what gets returned, regardless of which phase found it.
#[derive(Debug, Clone, Copy)]
pub struct BestSolutionRecaller {
    environment_mode: EnvironmentMode,
}

impl BestSolutionRecaller {
    /// Creates a recaller for the given environment mode.
    pub fn new(environment_mode: EnvironmentMode) -> Self {
        Self { environment_mode }
    }

    /// Processes a completed step with the given step score.
    ///
    /// Call after `StepScope::complete()`, so the phase counters already
    /// reflect the step.
    pub fn step_ended<S, D>(&self, phase_scope: &mut PhaseScope<'_, S, D>, step_score: S::Score)
    where
        S: PlanningSolution,
        D: ScoreDirector<S>,
    {
        let improved = match phase_scope.solver_scope().best_score() {
            None => true,
            Some(best) => step_score > *best,
        };

        if improved {
            let step_index = phase_scope.last_completed_step_index().unwrap_or(0);
            let mut snapshot = phase_scope.score_director().clone_working_solution();
            snapshot.set_score(Some(step_score));
            phase_scope.set_best_solution_step_index(step_index);
            phase_scope
                .solver_scope_mut()
                .set_best_solution(snapshot, step_score);
            tracing::debug!(step = step_index, score = %step_score, "New best solution");
        } else if self.environment_mode.is_full_assert() {
            phase_scope.solver_scope().assert_best_score_unmodified();
        }
    }

    /// Returns the environment mode.
    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }
}

impl Default for BestSolutionRecaller {
    fn default() -> Self {
        Self::new(EnvironmentMode::Reproducible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{PhaseScope, SolverScope};
    use crate::test_utils::nqueens_director;
    use plancraft_core::score::SimpleScore;

    #[test]
    fn strictly_better_step_becomes_the_best() {
        let mut solver_scope = SolverScope::new(nqueens_director(2));
        let mut phase_scope = PhaseScope::new(&mut solver_scope, 0);
        let recaller = BestSolutionRecaller::default();

        phase_scope.complete_step(0);
        recaller.step_ended(&mut phase_scope, SimpleScore::of(-5));
        assert_eq!(
            phase_scope.solver_scope().best_score(),
            Some(&SimpleScore::of(-5))
        );
        assert_eq!(phase_scope.best_solution_step_index(), Some(0));

        // An equal score is not an improvement: first seen wins.
        phase_scope.complete_step(1);
        recaller.step_ended(&mut phase_scope, SimpleScore::of(-5));
        assert_eq!(phase_scope.best_solution_step_index(), Some(0));

        phase_scope.complete_step(2);
        recaller.step_ended(&mut phase_scope, SimpleScore::of(-1));
        assert_eq!(
            phase_scope.solver_scope().best_score(),
            Some(&SimpleScore::of(-1))
        );
        assert_eq!(phase_scope.best_solution_step_index(), Some(2));
    }

    #[test]
    fn snapshot_carries_its_score() {
        let mut solver_scope = SolverScope::new(nqueens_director(2));
        let mut phase_scope = PhaseScope::new(&mut solver_scope, 0);
        let recaller = BestSolutionRecaller::default();

        phase_scope.complete_step(0);
        recaller.step_ended(&mut phase_scope, SimpleScore::of(-3));

        let best = phase_scope.solver_scope().best_solution().unwrap();
        assert_eq!(best.score, Some(SimpleScore::of(-3)));
    }
}
