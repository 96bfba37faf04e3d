//! Solver implementation.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use plancraft_config::SolverConfig;
use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::{NoTermination, Termination};

/// The main solver that optimizes planning solutions.
///
/// Drives the configured phases in order over one exclusively-owned
/// working solution; a solve is single-threaded and strictly sequential.
/// Uses macro-generated tuple implementations for phases, preserving
/// concrete types through the entire pipeline.
///
/// # Type Parameters
/// * `P` - Tuple of phases to execute
/// * `T` - Solver-level termination (`Option<ConcreteTermination>`)
/// * `S` - Solution type
/// * `D` - Score director type
///
/// # Example
///
/// ```
/// use plancraft_solver::solver::Solver;
/// use plancraft_solver::phase::Phase;
/// use plancraft_solver::scope::SolverScope;
/// use plancraft_solver::termination::TimeTermination;
/// use plancraft_core::domain::PlanningSolution;
/// use plancraft_core::score::SimpleScore;
/// use plancraft_scoring::{ScoreDirector, SimpleScoreDirector};
///
/// #[derive(Clone, Debug)]
/// struct MySolution { score: Option<SimpleScore> }
///
/// impl PlanningSolution for MySolution {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// #[derive(Debug)]
/// struct NoOpPhase;
///
/// impl<S: PlanningSolution, D: ScoreDirector<S>> Phase<S, D> for NoOpPhase {
///     fn solve(&mut self, _: &mut SolverScope<S, D>) {}
///     fn phase_type_name(&self) -> &'static str { "NoOp" }
/// }
///
/// type MyDirector = SimpleScoreDirector<MySolution, fn(&MySolution) -> SimpleScore>;
///
/// let solver: Solver<(NoOpPhase,), _, MySolution, MyDirector> =
///     Solver::new((NoOpPhase,)).with_termination(TimeTermination::seconds(30));
/// ```
pub struct Solver<P, T, S, D> {
    phases: P,
    termination: T,
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
    config: Option<SolverConfig>,
    _phantom: PhantomData<fn(S, D)>,
}

impl<P: Debug, T: Debug, S, D> Debug for Solver<P, T, S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("phases", &self.phases)
            .field("termination", &self.termination)
            .finish()
    }
}

impl<P, S, D> Solver<P, NoTermination, S, D>
where
    S: PlanningSolution,
{
    /// Creates a new solver with the given phase tuple and no
    /// solver-level termination.
    pub fn new(phases: P) -> Self {
        Solver {
            phases,
            termination: NoTermination,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            solving: Arc::new(AtomicBool::new(false)),
            config: None,
            _phantom: PhantomData,
        }
    }

    /// Sets the solver-level termination condition.
    pub fn with_termination<T>(self, termination: T) -> Solver<P, Option<T>, S, D> {
        Solver {
            phases: self.phases,
            termination: Some(termination),
            terminate_early_flag: self.terminate_early_flag,
            solving: self.solving,
            config: self.config,
            _phantom: PhantomData,
        }
    }
}

impl<P, T, S, D> Solver<P, T, S, D>
where
    S: PlanningSolution,
{
    /// Sets the configuration (random seed, environment mode, limits).
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Requests early termination of the solving process.
    ///
    /// Thread-safe; the flag is polled at step boundaries and between
    /// candidate evaluations. Returns false when no solve is running.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    /// Returns true if the solver is currently solving.
    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Returns the configuration if set.
    pub fn config(&self) -> Option<&SolverConfig> {
        self.config.as_ref()
    }
}

/// Marker trait for termination types usable at the solver level.
pub trait MaybeTermination<S: PlanningSolution, D: ScoreDirector<S>>: Send {
    /// Checks if the solver should terminate.
    fn should_terminate(&self, solver_scope: &SolverScope<S, D>) -> bool;
}

impl<S: PlanningSolution, D: ScoreDirector<S>, T: Termination<S, D>> MaybeTermination<S, D>
    for Option<T>
{
    fn should_terminate(&self, solver_scope: &SolverScope<S, D>) -> bool {
        match self {
            Some(t) => t.is_solver_terminated(solver_scope),
            None => false,
        }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> MaybeTermination<S, D> for NoTermination {
    fn should_terminate(&self, _solver_scope: &SolverScope<S, D>) -> bool {
        false
    }
}

macro_rules! impl_solver {
    ($($idx:tt: $P:ident),+) => {
        impl<S, D, T, $($P),+> Solver<($($P,)+), T, S, D>
        where
            S: PlanningSolution,
            D: ScoreDirector<S>,
            T: MaybeTermination<S, D>,
            $($P: Phase<S, D>,)+
        {
            /// Solves using the provided score director and returns the
            /// best solution found, with its score written back.
            pub fn solve(&mut self, score_director: D) -> S {
                self.solving.store(true, Ordering::SeqCst);
                self.terminate_early_flag.store(false, Ordering::SeqCst);

                let seed = self.config.as_ref().and_then(|c| c.random_seed);
                let mut solver_scope = match seed {
                    Some(seed) => SolverScope::with_seed(score_director, seed),
                    None => SolverScope::new(score_director),
                };
                solver_scope.set_terminate_early_flag(self.terminate_early_flag.clone());
                solver_scope.start_solving();

                $(
                    if !self.check_termination(&solver_scope) {
                        tracing::debug!(
                            "Starting phase {} ({})",
                            $idx,
                            self.phases.$idx.phase_type_name()
                        );
                        self.phases.$idx.solve(&mut solver_scope);
                        tracing::debug!(
                            "Finished phase {} ({}) with best score {:?}",
                            $idx,
                            self.phases.$idx.phase_type_name(),
                            solver_scope.best_score()
                        );
                    }
                )+

                self.solving.store(false, Ordering::SeqCst);
                solver_scope.take_best_or_working_solution()
            }

            fn check_termination(&self, solver_scope: &SolverScope<S, D>) -> bool {
                if self.terminate_early_flag.load(Ordering::SeqCst) {
                    return true;
                }
                self.termination.should_terminate(solver_scope)
            }
        }
    };
}

impl_solver!(0: P0);
impl_solver!(0: P0, 1: P1);
impl_solver!(0: P0, 1: P1, 2: P2);
impl_solver!(0: P0, 1: P1, 2: P2, 3: P3);
impl_solver!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4);
impl_solver!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::selector::{
        ChangeMoveSelector, FromSolutionEntitySelector, StaticValueSelector,
    };
    use crate::phase::construction::{BestScoreForager, ConstructionPhase, QueuedEntityPlacer};
    use crate::phase::localsearch::{
        AcceptedCountForager, HillClimbingAcceptor, LocalSearchPhase,
    };
    use crate::termination::{
        NoTermination, PhaseToSolverBridge, StepCountTermination,
    };
    use crate::test_utils::{
        get_queen_row, nqueens_director, set_queen_row, NQueensDirector, NQueensSolution,
    };
    use plancraft_core::score::SimpleScore;

    fn construction_phase(
        n: i64,
    ) -> ConstructionPhase<
        NQueensSolution,
        crate::heuristic::r#move::ChangeMove<NQueensSolution, i64>,
        QueuedEntityPlacer<NQueensSolution, i64, FromSolutionEntitySelector, StaticValueSelector<i64>>,
        BestScoreForager<NQueensSolution>,
        NoTermination,
    > {
        let placer = QueuedEntityPlacer::new(
            FromSolutionEntitySelector::new(0),
            StaticValueSelector::new((0..n).collect()),
            get_queen_row,
            set_queen_row,
            "row",
        );
        ConstructionPhase::new(placer, BestScoreForager::new(), NoTermination)
    }

    #[test]
    fn two_phase_solve_reaches_a_solved_board() {
        let n = 6i64;
        let local_search = LocalSearchPhase::new(
            ChangeMoveSelector::new(
                FromSolutionEntitySelector::new(0),
                StaticValueSelector::new((0..n).collect()),
                get_queen_row,
                set_queen_row,
                "row",
            ),
            HillClimbingAcceptor::new(),
            AcceptedCountForager::new(),
            StepCountTermination::new(50),
        )
        .with_phase_index(1);

        let mut solver: Solver<_, _, NQueensSolution, NQueensDirector> =
            Solver::new((construction_phase(n), local_search));
        let solution = solver.solve(nqueens_director(n));

        let score = solution.score.expect("score is written back");
        assert!(
            score >= SimpleScore::of(-1),
            "6-queens construction + hill climbing got {}",
            score
        );
        assert!(solution.queens.iter().all(|q| q.row.is_some()));
    }

    #[test]
    fn solved_solution_carries_its_score() {
        let mut solver: Solver<_, _, NQueensSolution, NQueensDirector> =
            Solver::new((construction_phase(4),));
        let solution = solver.solve(nqueens_director(4));
        assert!(solution.score.is_some());
    }

    #[test]
    fn deterministic_seed_reproduces_the_run() {
        use plancraft_config::SolverConfig;

        let mut config = SolverConfig::new();
        config.random_seed = Some(7);

        let mut a: Solver<_, _, NQueensSolution, NQueensDirector> =
            Solver::new((construction_phase(5),)).with_config(config.clone());
        let mut b: Solver<_, _, NQueensSolution, NQueensDirector> =
            Solver::new((construction_phase(5),)).with_config(config);

        let x = a.solve(nqueens_director(5));
        let y = b.solve(nqueens_director(5));
        let xr: Vec<_> = x.queens.iter().map(|q| q.row).collect();
        let yr: Vec<_> = y.queens.iter().map(|q| q.row).collect();
        assert_eq!(xr, yr);
    }

    #[test]
    fn solver_termination_skips_remaining_phases() {
        // A zero-step solver budget, bridged into the first phase, stops
        // everything before any step runs.
        let placer = QueuedEntityPlacer::new(
            FromSolutionEntitySelector::new(0),
            StaticValueSelector::new(vec![0i64, 1]),
            get_queen_row,
            set_queen_row,
            "row",
        );
        let first = ConstructionPhase::new(
            placer,
            BestScoreForager::new(),
            PhaseToSolverBridge::new(StepCountTermination::new(0)),
        );

        let mut solver: Solver<_, _, NQueensSolution, NQueensDirector> =
            Solver::new((first,)).with_termination(StepCountTermination::new(0));
        let solution = solver.solve(nqueens_director(2));

        assert!(solution.queens.iter().all(|q| q.row.is_none()));
    }

    #[test]
    fn terminate_early_is_a_no_op_when_idle() {
        let solver: Solver<_, NoTermination, NQueensSolution, NQueensDirector> =
            Solver::new((construction_phase(2),));
        assert!(!solver.terminate_early());
        assert!(!solver.is_solving());
    }
}
