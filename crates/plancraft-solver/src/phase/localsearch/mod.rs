//! Local search phase
//!
//! Improves an initialized solution step by step. Acceptance is a
//! pluggable policy (hill climbing, simulated annealing) behind the same
//! Move/Score contracts as construction.

mod acceptor;
mod forager;
mod phase;

pub use acceptor::{Acceptor, HillClimbingAcceptor, SimulatedAnnealingAcceptor};
pub use forager::AcceptedCountForager;
pub use phase::LocalSearchPhase;
