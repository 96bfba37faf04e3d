//! Local search phase implementation.

use std::fmt::Debug;
use std::marker::PhantomData;

use plancraft_config::EnvironmentMode;
use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::{MoveSelector, SelectorLifecycle};
use crate::phase::Phase;
use crate::recaller::BestSolutionRecaller;
use crate::scope::{PhaseScope, SolverScope, StepScope};
use crate::termination::Termination;

use super::{AcceptedCountForager, Acceptor};

/// Local search phase that improves an initialized solution.
///
/// Each step: enumerate candidate moves, evaluate each with the
/// do/score/undo cycle, ask the acceptor which may compete, and commit
/// the forager's winner. A step with no accepted move ends the phase
/// (a hill climbing dead end).
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `M` - The move type
/// * `MS` - The move selector type
/// * `A` - The acceptor type
/// * `T` - The phase termination type
pub struct LocalSearchPhase<S, M, MS, A, T>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: MoveSelector<S, M>,
{
    move_selector: MS,
    acceptor: A,
    forager: AcceptedCountForager<S>,
    termination: T,
    recaller: BestSolutionRecaller,
    environment_mode: EnvironmentMode,
    phase_index: usize,
    _phantom: PhantomData<fn() -> (S, M)>,
}

impl<S, M, MS, A, T> LocalSearchPhase<S, M, MS, A, T>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: MoveSelector<S, M>,
{
    /// Creates a new local search phase.
    pub fn new(
        move_selector: MS,
        acceptor: A,
        forager: AcceptedCountForager<S>,
        termination: T,
    ) -> Self {
        Self {
            move_selector,
            acceptor,
            forager,
            termination,
            recaller: BestSolutionRecaller::default(),
            environment_mode: EnvironmentMode::default(),
            phase_index: 0,
            _phantom: PhantomData,
        }
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self.recaller = BestSolutionRecaller::new(environment_mode);
        self
    }

    /// Sets the phase index used in scopes and logs.
    pub fn with_phase_index(mut self, phase_index: usize) -> Self {
        self.phase_index = phase_index;
        self
    }
}

impl<S, M, MS, A, T> Debug for LocalSearchPhase<S, M, MS, A, T>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Debug,
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("move_selector", &self.move_selector)
            .field("acceptor", &self.acceptor)
            .field("forager", &self.forager)
            .field("termination", &self.termination)
            .finish()
    }
}

impl<S, D, M, MS, A, T> Phase<S, D> for LocalSearchPhase<S, M, MS, A, T>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Acceptor<S>,
    T: Termination<S, D>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) {
        let mut phase_scope = PhaseScope::new(solver_scope, self.phase_index);
        let mut last_step_score = phase_scope.calculate_score();
        tracing::debug!(
            phase = self.phase_index,
            starting_score = %last_step_score,
            "Local search started"
        );

        self.move_selector.phase_started();
        self.acceptor.phase_started(&last_step_score);
        self.termination.phase_started(&phase_scope);

        loop {
            if phase_scope.solver_scope().is_terminate_early() {
                break;
            }
            if self.termination.is_phase_terminated(&phase_scope) {
                break;
            }

            let time_gradient = self
                .termination
                .calculate_phase_time_gradient(&phase_scope)
                .max(0.0);
            self.move_selector.step_started();
            self.acceptor.step_started(time_gradient);
            self.forager.step_started();

            let mut step_scope = StepScope::new(&mut phase_scope);

            // Materialize this step's candidates; a never-ending selector
            // is capped at one round of its reported size.
            let moves: Vec<M> = {
                let iter = self.move_selector.iter_moves(step_scope.score_director());
                if self.move_selector.is_never_ending() {
                    let cap = self.move_selector.size(step_scope.score_director()).max(1);
                    iter.take(cap).collect()
                } else {
                    iter.collect()
                }
            };

            let mut evaluated = 0u64;
            for (index, candidate) in moves.iter().enumerate() {
                if step_scope.is_terminate_early() {
                    break;
                }
                if !candidate.is_doable(step_scope.score_director()) {
                    continue;
                }

                let undo = candidate.create_undo_move(step_scope.score_director());
                candidate.do_move(step_scope.score_director_mut());
                let move_score = step_scope.calculate_score();
                if self.environment_mode.is_full_assert() {
                    step_scope
                        .score_director_mut()
                        .assert_working_score(move_score);
                }
                evaluated += 1;
                undo.do_move(step_scope.score_director_mut());

                let accepted =
                    self.acceptor
                        .is_accepted(step_scope.rng(), &last_step_score, &move_score);
                if accepted {
                    self.forager.add_move(index, move_score);
                }
                if self.forager.is_quit_early() {
                    break;
                }
            }
            step_scope.set_selected_move_count(evaluated);

            let Some((winner, step_score)) = self.forager.pick_winner() else {
                step_scope.complete();
                tracing::debug!("No accepted move; local search is stuck");
                break;
            };

            moves[winner].do_move(step_scope.score_director_mut());
            step_scope.score_director_mut().trigger_variable_listeners();
            step_scope.set_step_score(step_score);
            step_scope.complete();

            last_step_score = step_score;
            self.recaller.step_ended(&mut phase_scope, step_score);
            self.acceptor.step_ended(&step_score);
            self.move_selector.step_ended();
            self.termination.step_ended(&phase_scope);
        }

        self.termination.phase_ended(&phase_scope);
        self.acceptor.phase_ended();
        self.move_selector.phase_ended();
        tracing::debug!(
            phase = self.phase_index,
            steps = phase_scope.step_count(),
            best_score = ?phase_scope.solver_scope().best_score(),
            "Local search ended"
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
