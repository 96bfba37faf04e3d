//! Plancraft scoring
//!
//! Score directors own the working solution and the score computation
//! facility. A single solve has exclusive ownership of its director; there
//! is no shared mutable state between solves.

pub mod director;

pub use director::{
    IncrementalScoreCalculator, IncrementalScoreDirector, ScoreDirector, SimpleScoreDirector,
};
