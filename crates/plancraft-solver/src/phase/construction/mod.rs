//! Construction heuristic phase
//!
//! Builds an initial solution by assigning values to uninitialized
//! planning variables one entity at a time: placer → decider → forager.

mod decider;
mod forager;
mod phase;
mod placer;

pub use decider::ConstructionDecider;
pub use forager::{BestScoreForager, ConstructionForager, FirstFitForager};
pub use phase::ConstructionPhase;
pub use placer::{EntityPlacer, Placement, QueuedEntityPlacer, SortedEntityPlacer};
