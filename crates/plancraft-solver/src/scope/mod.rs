//! Transient scope contexts for solve, phase, and step.
//!
//! Scopes are short-lived context values passed by reference for the
//! duration of the enclosing solve/phase/step; they are never stored
//! beyond that frame.

mod phase;
mod solver;
mod step;

#[cfg(test)]
mod tests;

pub use phase::PhaseScope;
pub use solver::SolverScope;
pub use step::StepScope;
