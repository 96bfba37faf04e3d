use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use plancraft_core::domain::PlanningSolution;
use plancraft_core::score::SimpleScore;

use crate::test_utils::{nqueens_director, uninitialized_solution, NQueensSolution};

use super::*;

#[test]
fn step_counters_roll_up_to_phase_and_solver() {
    let mut solver_scope = SolverScope::new(nqueens_director(2));
    solver_scope.start_solving();

    let mut phase_scope = PhaseScope::new(&mut solver_scope, 0);
    for expected_index in 0..3u64 {
        let mut step_scope = StepScope::new(&mut phase_scope);
        assert_eq!(step_scope.step_index(), expected_index);
        step_scope.complete();
    }

    assert_eq!(phase_scope.step_count(), 3);
    assert_eq!(phase_scope.last_completed_step_index(), Some(2));
    assert_eq!(phase_scope.solver_scope().total_step_count(), 3);
}

#[test]
fn unimproved_step_count_tracks_indices() {
    let mut solver_scope = SolverScope::new(nqueens_director(2));
    let mut phase_scope = PhaseScope::new(&mut solver_scope, 0);

    assert_eq!(phase_scope.unimproved_step_count(), 0);

    for i in 0..16u64 {
        phase_scope.complete_step(i);
    }
    phase_scope.set_best_solution_step_index(10);
    assert_eq!(phase_scope.unimproved_step_count(), 5);
}

#[test]
fn terminate_early_flag_is_polled() {
    let mut solver_scope = SolverScope::new(nqueens_director(2));
    assert!(!solver_scope.is_terminate_early());

    let flag = Arc::new(AtomicBool::new(false));
    solver_scope.set_terminate_early_flag(flag.clone());
    assert!(!solver_scope.is_terminate_early());

    flag.store(true, Ordering::SeqCst);
    assert!(solver_scope.is_terminate_early());
}

#[test]
fn take_best_or_working_falls_back_to_scored_working_solution() {
    let solver_scope = SolverScope::new(nqueens_director(2));
    let solution = solver_scope.take_best_or_working_solution();
    // Nothing was assigned, so zero conflicts.
    assert_eq!(solution.score, Some(SimpleScore::ZERO));
}

#[test]
fn best_solution_snapshot_is_returned() {
    let mut solver_scope = SolverScope::new(nqueens_director(2));
    let mut best: NQueensSolution = uninitialized_solution(2);
    best.queens[0].row = Some(1);
    best.set_score(Some(SimpleScore::of(-1)));
    solver_scope.set_best_solution(best, SimpleScore::of(-1));

    solver_scope.assert_best_score_unmodified();

    let solution = solver_scope.take_best_or_working_solution();
    assert_eq!(solution.queens[0].row, Some(1));
    assert_eq!(solution.score, Some(SimpleScore::of(-1)));
}

#[test]
#[should_panic(expected = "Best score was modified")]
fn mutated_best_snapshot_is_detected() {
    let mut solver_scope = SolverScope::new(nqueens_director(2));
    let mut best = uninitialized_solution(2);
    // The snapshot's score cell disagrees with the recorded best score.
    best.set_score(Some(SimpleScore::of(-3)));
    solver_scope.set_best_solution(best, SimpleScore::of(-1));
    solver_scope.assert_best_score_unmodified();
}

#[test]
fn seeded_scopes_draw_identical_random_sequences() {
    use rand::Rng;

    let mut a = SolverScope::with_seed(nqueens_director(2), 42);
    let mut b = SolverScope::with_seed(nqueens_director(2), 42);
    let xs: Vec<u64> = (0..4).map(|_| a.rng().random()).collect();
    let ys: Vec<u64> = (0..4).map(|_| b.rng().random()).collect();
    assert_eq!(xs, ys);
}
