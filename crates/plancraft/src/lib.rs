//! Plancraft - a metaheuristic planning engine in Rust
//!
//! Describe a problem as planning entities whose planning variables are
//! assigned values from bounded value ranges; the engine searches for an
//! assignment that optimizes a hierarchical (hard/soft) score.
//!
//! # Example
//!
//! ```
//! use plancraft::prelude::*;
//!
//! let score = HardSoftScore::of(0, -100);
//! assert!(score.is_feasible());
//! assert_eq!(HardSoftScore::parse("0hard/-100soft").unwrap(), score);
//! ```

// Score types and schema
pub use plancraft_core::domain::{
    CompositeValueRange, ComputedValueRangeProvider, EntityDescriptor, FieldValueRangeProvider,
    IntRange, PlanningSolution, SolutionDescriptor, StaticValueRange, ValueRangeProvider,
    VariableDescriptor, VariableKind, VariableListener,
};
pub use plancraft_core::error::{PlancraftError, Result};
pub use plancraft_core::score::{
    level_weighted_time_gradient, HardSoftScore, InitializingScoreTrend, ParseableScore, Score,
    ScoreBounder, ScoreParseError, SimpleScore, TrendLevel,
};

// Score directors
pub use plancraft_scoring::{
    IncrementalScoreCalculator, IncrementalScoreDirector, ScoreDirector, SimpleScoreDirector,
};

// Configuration
pub use plancraft_config::{
    AcceptorType, BenchConfig, ConfigError, EnvironmentMode, ForagerType, PhaseConfig,
    SolverConfig, TerminationConfig,
};

// Solver engine
pub use plancraft_solver::{
    AcceptedCountForager, Acceptor, AndTermination, BestScoreForager, BestSolutionRecaller,
    CachingEntitySelector, CachingMoveSelector, CachingValueSelector, ChangeMove,
    ChangeMoveSelector, CompositeMove, ConstructionDecider, ConstructionForager,
    ConstructionPhase, EntityPlacer, EntityRef, EntitySelector, FilteringMoveSelector,
    FilteringValueSelector, FirstFitForager, FromRangeValueSelector, FromSolutionEntitySelector,
    HillClimbingAcceptor, LocalSearchPhase, Move, MoveSelector, NoTermination,
    NullableValueSelector, OrTermination, Phase, PhaseScope, PhaseToSolverBridge, Placement,
    QueuedEntityPlacer, RandomValueSelector, SelectionCacheType, SelectorLifecycle,
    SimulatedAnnealingAcceptor, Solver, SolverScope, SortedEntityPlacer, SortedEntitySelector,
    SortedValueSelector, SortingMoveSelector, StaticValueSelector, StepCountTermination,
    StepScope, SwapMove, Termination, TimeTermination, UnimprovedStepCountTermination,
    UnionMoveSelector, ValueSelector,
};

// Benchmarking
pub use plancraft_bench::{rank_results, BenchCandidate, BenchResult, BenchRunner};

/// Convenience re-exports for the common case.
pub mod prelude {
    pub use plancraft_config::{EnvironmentMode, SolverConfig};
    pub use plancraft_core::domain::{
        EntityDescriptor, PlanningSolution, SolutionDescriptor, VariableDescriptor,
    };
    pub use plancraft_core::score::{HardSoftScore, ParseableScore, Score, SimpleScore};
    pub use plancraft_scoring::{ScoreDirector, SimpleScoreDirector};
    pub use plancraft_solver::{
        AcceptedCountForager, BestScoreForager, ChangeMove, ChangeMoveSelector,
        ConstructionPhase, FromSolutionEntitySelector, HillClimbingAcceptor, LocalSearchPhase,
        NoTermination, QueuedEntityPlacer, Solver, StaticValueSelector, StepCountTermination,
        TimeTermination, UnimprovedStepCountTermination,
    };
}
