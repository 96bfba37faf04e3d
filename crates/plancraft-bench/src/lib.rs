//! Plancraft benchmark runner
//!
//! Outer-level comparison of independent solver configurations. Solving
//! itself is strictly sequential; this crate only parallelizes across
//! whole runs, each with its own working solution.

mod result;
mod runner;

pub use result::{rank_results, BenchResult};
pub use runner::{BenchCandidate, BenchRunner};
