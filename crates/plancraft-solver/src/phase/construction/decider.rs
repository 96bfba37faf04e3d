//! Construction heuristic decider.

use plancraft_config::EnvironmentMode;
use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::scope::StepScope;
use crate::termination::Termination;

use super::{ConstructionForager, Placement};

/// Evaluates one placement per step and commits the winning move.
///
/// For each candidate move, in placement order, unless the forager quits
/// early, the phase termination fires, or an external stop is requested:
///
/// 1. Compute the candidate's undo move (before applying it).
/// 2. Apply the candidate.
/// 3. Recompute the working score; in full-assert mode, verify it against
///    a from-scratch recomputation.
/// 4. Record (ordinal index, score) with the forager.
/// 5. Apply the undo move, restoring the working state.
///
/// The forager then picks exactly one recorded candidate; the winner is
/// re-applied permanently and its score becomes the step score. Zero
/// recorded candidates leave the step without a selected move, which is
/// not an error.
#[derive(Debug)]
pub struct ConstructionDecider<Fo> {
    forager: Fo,
    environment_mode: EnvironmentMode,
}

impl<Fo> ConstructionDecider<Fo> {
    /// Creates a decider around the given forager.
    pub fn new(forager: Fo) -> Self {
        Self {
            forager,
            environment_mode: EnvironmentMode::default(),
        }
    }

    /// Sets the environment mode (full-assert enables score verification).
    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    /// Decides and commits this step's move, if any.
    pub fn decide_next_step<S, D, M, T>(
        &mut self,
        step_scope: &mut StepScope<'_, '_, S, D>,
        placement: &Placement<S, M>,
        termination: &T,
    ) where
        S: PlanningSolution,
        D: ScoreDirector<S>,
        M: Move<S>,
        Fo: ConstructionForager<S>,
        T: Termination<S, D>,
    {
        self.forager.step_started();
        let mut evaluated = 0u64;

        for (index, candidate) in placement.moves.iter().enumerate() {
            if step_scope.is_terminate_early() {
                break;
            }
            if termination.is_phase_terminated(step_scope.phase_scope()) {
                break;
            }
            if !candidate.is_doable(step_scope.score_director()) {
                continue;
            }

            // Undo move first: it captures the pre-move value.
            let undo = candidate.create_undo_move(step_scope.score_director());
            candidate.do_move(step_scope.score_director_mut());
            let score = step_scope.calculate_score();
            if self.environment_mode.is_full_assert() {
                step_scope.score_director_mut().assert_working_score(score);
            }
            self.forager.add_move(index, score);
            evaluated += 1;
            undo.do_move(step_scope.score_director_mut());

            if self.forager.is_quit_early() {
                break;
            }
        }

        step_scope.set_selected_move_count(evaluated);

        if let Some((winner, score)) = self.forager.pick_winner() {
            let selected = &placement.moves[winner];
            selected.do_move(step_scope.score_director_mut());
            step_scope.score_director_mut().trigger_variable_listeners();
            step_scope.set_step_score(score);
            tracing::trace!(
                step = step_scope.step_index(),
                entity = ?placement.entity_ref,
                winner,
                score = %score,
                "Step move selected"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::r#move::ChangeMove;
    use crate::heuristic::selector::EntityRef;
    use crate::phase::construction::BestScoreForager;
    use crate::scope::{PhaseScope, SolverScope, StepScope};
    use crate::termination::NoTermination;
    use crate::test_utils::{
        get_queen_row, row_sum_director, set_queen_row, uninitialized_solution, NQueensSolution,
    };
    use plancraft_core::score::SimpleScore;
    use plancraft_scoring::ScoreDirector;

    type QueenMove = ChangeMove<NQueensSolution, i64>;

    fn placement_with_values(entity: usize, values: &[i64]) -> Placement<NQueensSolution, QueenMove> {
        let moves = values
            .iter()
            .map(|&v| ChangeMove::new(entity, Some(v), get_queen_row, set_queen_row, "row"))
            .collect();
        Placement::new(EntityRef::new(0, entity), moves)
    }

    #[test]
    fn winner_is_applied_and_scored() {
        let mut solver_scope = SolverScope::new(row_sum_director(uninitialized_solution(1)));
        let mut phase_scope = PhaseScope::new(&mut solver_scope, 0);
        let mut step_scope = StepScope::new(&mut phase_scope);

        let mut decider = ConstructionDecider::new(BestScoreForager::new());
        let placement = placement_with_values(0, &[1, 5, 3]);
        decider.decide_next_step(&mut step_scope, &placement, &NoTermination);

        assert_eq!(step_scope.selected_move_count(), 3);
        assert_eq!(step_scope.step_score(), Some(&SimpleScore::of(5)));
        assert_eq!(
            get_queen_row(step_scope.score_director().working_solution(), 0),
            Some(5)
        );
    }

    #[test]
    fn losing_candidates_are_fully_undone() {
        let mut solver_scope = SolverScope::new(row_sum_director(uninitialized_solution(2)));
        let mut phase_scope = PhaseScope::new(&mut solver_scope, 0);
        let mut step_scope = StepScope::new(&mut phase_scope);

        let mut decider = ConstructionDecider::new(BestScoreForager::new());
        let placement = placement_with_values(0, &[4, 9]);
        decider.decide_next_step(&mut step_scope, &placement, &NoTermination);

        // Only the winner (9) is committed; entity 1 stays untouched.
        assert_eq!(
            get_queen_row(step_scope.score_director().working_solution(), 0),
            Some(9)
        );
        assert_eq!(
            get_queen_row(step_scope.score_director().working_solution(), 1),
            None
        );
    }

    #[test]
    fn empty_placement_completes_with_zero_selected_moves() {
        let mut solver_scope = SolverScope::new(row_sum_director(uninitialized_solution(1)));
        let score_before = solver_scope.calculate_score();
        let mut phase_scope = PhaseScope::new(&mut solver_scope, 0);
        let mut step_scope = StepScope::new(&mut phase_scope);

        let mut decider = ConstructionDecider::new(BestScoreForager::new());
        let placement: Placement<NQueensSolution, QueenMove> =
            Placement::new(EntityRef::new(0, 0), vec![]);
        decider.decide_next_step(&mut step_scope, &placement, &NoTermination);

        assert_eq!(step_scope.selected_move_count(), 0);
        assert!(step_scope.step_score().is_none());
        assert_eq!(step_scope.calculate_score(), score_before);
    }

    #[test]
    fn full_assert_mode_verifies_every_candidate() {
        use plancraft_config::EnvironmentMode;

        let mut solver_scope = SolverScope::new(row_sum_director(uninitialized_solution(1)));
        let mut phase_scope = PhaseScope::new(&mut solver_scope, 0);
        let mut step_scope = StepScope::new(&mut phase_scope);

        let mut decider = ConstructionDecider::new(BestScoreForager::new())
            .with_environment_mode(EnvironmentMode::FullAssert);
        let placement = placement_with_values(0, &[1, 2]);
        // The simple director recomputes from scratch, so assertions hold.
        decider.decide_next_step(&mut step_scope, &placement, &NoTermination);
        assert_eq!(step_scope.step_score(), Some(&SimpleScore::of(2)));
    }
}
