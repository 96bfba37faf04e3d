//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

/// Top-level scope for the entire solving process.
///
/// Owns the score director (and through it the working solution) for the
/// duration of one solve. Generic over `D: ScoreDirector<S>` so the
/// concrete director type is preserved through the whole pipeline.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    best_solution: Option<S>,
    best_score: Option<S::Score>,
    best_solution_step_index: Option<u64>,
    rng: ChaCha8Rng,
    start_time: Option<Instant>,
    total_step_count: u64,
    terminate_early_flag: Option<Arc<AtomicBool>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> SolverScope<S, D> {
    /// Creates a scope seeded from OS entropy.
    pub fn new(score_director: D) -> Self {
        Self::build(score_director, ChaCha8Rng::from_os_rng())
    }

    /// Creates a scope with a deterministic random seed.
    pub fn with_seed(score_director: D, seed: u64) -> Self {
        Self::build(score_director, ChaCha8Rng::seed_from_u64(seed))
    }

    fn build(score_director: D, rng: ChaCha8Rng) -> Self {
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            best_solution_step_index: None,
            rng,
            start_time: None,
            total_step_count: 0,
            terminate_early_flag: None,
        }
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
    }

    pub fn elapsed(&self) -> Option<std::time::Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.score_director.calculate_score()
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.best_score.as_ref()
    }

    /// Total step index at which the best solution was last improved.
    pub fn best_solution_step_index(&self) -> Option<u64> {
        self.best_solution_step_index
    }

    /// Records a new best solution snapshot.
    pub fn set_best_solution(&mut self, solution: S, score: S::Score) {
        self.best_solution = Some(solution);
        self.best_score = Some(score);
        self.best_solution_step_index = Some(self.total_step_count);
    }

    /// Verifies the best snapshot still carries the score that was
    /// recorded for it. A mismatch means a later step leaked a mutation
    /// into the snapshot, which the engine cannot safely continue past.
    pub fn assert_best_score_unmodified(&self) {
        if let (Some(solution), Some(score)) = (&self.best_solution, &self.best_score) {
            let carried = solution.score();
            if carried != Some(*score) {
                panic!(
                    "Best score was modified: snapshot carries {:?} but {} was recorded",
                    carried, score
                );
            }
        }
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Returns the best solution, falling back to a scored snapshot of the
    /// working solution when no step ever improved on the initial state.
    pub fn take_best_or_working_solution(mut self) -> S {
        match self.best_solution.take() {
            Some(best) => best,
            None => {
                let score = self.score_director.calculate_score();
                let mut solution = self.score_director.clone_working_solution();
                solution.set_score(Some(score));
                solution
            }
        }
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    /// Cooperative stop signal, polled at step boundaries and between
    /// candidate evaluations.
    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}
