//! Plancraft Solver Engine
//!
//! This crate provides the planning engine:
//! - Solver orchestration over phase tuples
//! - Phases (construction heuristic, local search)
//! - Move system with explicit undo moves
//! - Entity/value/move selectors with caching tiers
//! - Termination conditions and the phase-to-solver bridge
//! - Best-solution recall
//!
//! A single solve is strictly sequential: phases run one after another,
//! steps run one after another within a phase, and candidate moves are
//! evaluated one after another via the do/score/undo cycle.

pub mod heuristic;
pub mod phase;
pub mod recaller;
pub mod scope;
pub mod solver;
pub mod termination;

#[cfg(test)]
pub(crate) mod test_utils;

pub use heuristic::r#move::{ChangeMove, CompositeMove, Move, SwapMove};
pub use heuristic::selector::decorator::{
    CachingEntitySelector, CachingMoveSelector, CachingValueSelector, FilteringMoveSelector,
    FilteringValueSelector, SelectionCacheType, SortedEntitySelector, SortedValueSelector,
    SortingMoveSelector,
};
pub use heuristic::selector::{
    ChangeMoveSelector, EntityRef, EntitySelector, FromRangeValueSelector,
    FromSolutionEntitySelector, MoveSelector, NullableValueSelector, RandomValueSelector,
    SelectorLifecycle, StaticValueSelector, UnionMoveSelector, ValueSelector,
};
pub use phase::construction::{
    BestScoreForager, ConstructionDecider, ConstructionForager, ConstructionPhase, EntityPlacer,
    FirstFitForager, Placement, QueuedEntityPlacer, SortedEntityPlacer,
};
pub use phase::localsearch::{
    AcceptedCountForager, Acceptor, HillClimbingAcceptor, LocalSearchPhase,
    SimulatedAnnealingAcceptor,
};
pub use phase::Phase;
pub use recaller::BestSolutionRecaller;
pub use scope::{PhaseScope, SolverScope, StepScope};
pub use solver::{MaybeTermination, Solver};
pub use termination::{
    AndTermination, NoTermination, OrTermination, PhaseToSolverBridge, StepCountTermination,
    Termination, TimeTermination, UnimprovedStepCountTermination, UNSUPPORTED_TIME_GRADIENT,
};
