//! Plancraft core types
//!
//! This crate provides the foundation of the Plancraft planning engine:
//! - Score types (SimpleScore, HardSoftScore) with lexicographic comparison,
//!   parsing, time-gradient interpolation, and bound construction
//! - The planning domain schema: solutions, entity/variable descriptors,
//!   and value range providers
//! - Error types

pub mod domain;
pub mod error;
pub mod score;

pub use domain::PlanningSolution;
pub use error::{PlancraftError, Result};
pub use score::{HardSoftScore, ParseableScore, Score, SimpleScore};
