//! Construction heuristic phase implementation.

use std::fmt::Debug;
use std::marker::PhantomData;

use plancraft_config::EnvironmentMode;
use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::SelectorLifecycle;
use crate::phase::Phase;
use crate::recaller::BestSolutionRecaller;
use crate::scope::{PhaseScope, SolverScope, StepScope};
use crate::termination::Termination;

use super::{ConstructionDecider, ConstructionForager, EntityPlacer};

/// Construction heuristic phase that builds an initial solution.
///
/// Runs a state machine over the placer's queue: each step takes the next
/// uninitialized entity's placement, lets the decider evaluate and commit
/// one move, and consults the recaller and termination. The phase is done
/// when the placer runs out of entities (or a termination fires first).
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `M` - The move type
/// * `P` - The entity placer type
/// * `Fo` - The forager type
/// * `T` - The phase termination type
pub struct ConstructionPhase<S, M, P, Fo, T>
where
    S: PlanningSolution,
    M: Move<S>,
    P: EntityPlacer<S, M>,
{
    placer: P,
    decider: ConstructionDecider<Fo>,
    termination: T,
    recaller: BestSolutionRecaller,
    phase_index: usize,
    _phantom: PhantomData<fn() -> (S, M)>,
}

impl<S, M, P, Fo, T> ConstructionPhase<S, M, P, Fo, T>
where
    S: PlanningSolution,
    M: Move<S>,
    P: EntityPlacer<S, M>,
{
    /// Creates a new construction phase.
    pub fn new(placer: P, forager: Fo, termination: T) -> Self {
        Self {
            placer,
            decider: ConstructionDecider::new(forager),
            termination,
            recaller: BestSolutionRecaller::default(),
            phase_index: 0,
            _phantom: PhantomData,
        }
    }

    /// Sets the environment mode for the decider and recaller.
    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.decider = self.decider.with_environment_mode(environment_mode);
        self.recaller = BestSolutionRecaller::new(environment_mode);
        self
    }

    /// Sets the phase index used in scopes and logs.
    pub fn with_phase_index(mut self, phase_index: usize) -> Self {
        self.phase_index = phase_index;
        self
    }
}

impl<S, M, P, Fo, T> Debug for ConstructionPhase<S, M, P, Fo, T>
where
    S: PlanningSolution,
    M: Move<S>,
    P: EntityPlacer<S, M>,
    Fo: Debug,
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructionPhase")
            .field("placer", &self.placer)
            .field("decider", &self.decider)
            .field("termination", &self.termination)
            .finish()
    }
}

impl<S, D, M, P, Fo, T> Phase<S, D> for ConstructionPhase<S, M, P, Fo, T>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
    P: EntityPlacer<S, M>,
    Fo: ConstructionForager<S>,
    T: Termination<S, D>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) {
        let mut phase_scope = PhaseScope::new(solver_scope, self.phase_index);
        tracing::debug!(phase = self.phase_index, "Construction heuristic started");

        self.placer.reset();
        self.placer.phase_started();
        self.termination.phase_started(&phase_scope);

        loop {
            if phase_scope.solver_scope().is_terminate_early() {
                break;
            }
            if self.termination.is_phase_terminated(&phase_scope) {
                break;
            }
            let Some(placement) = self.placer.next_placement(phase_scope.score_director())
            else {
                break;
            };

            self.placer.step_started();
            let mut step_scope = StepScope::new(&mut phase_scope);
            self.decider
                .decide_next_step(&mut step_scope, &placement, &self.termination);

            let step_score = step_scope.step_score().copied();
            let selected_move_count = step_scope.selected_move_count();
            step_scope.complete();

            match step_score {
                Some(score) => self.recaller.step_ended(&mut phase_scope, score),
                None => tracing::trace!(
                    entity = ?placement.entity_ref,
                    selected_move_count,
                    "Empty step; entity left unassigned"
                ),
            }
            self.placer.step_ended();
            self.termination.step_ended(&phase_scope);
        }

        self.termination.phase_ended(&phase_scope);
        self.placer.phase_ended();
        tracing::debug!(
            phase = self.phase_index,
            steps = phase_scope.step_count(),
            best_score = ?phase_scope.solver_scope().best_score(),
            "Construction heuristic ended"
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "ConstructionHeuristic"
    }
}
