//! Move trait definition.

use std::fmt::Debug;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

/// An atomic, reversible change to one or more planning variables.
///
/// Moves are fully typed for maximum performance - no boxing, no virtual
/// dispatch. Undo is handled by explicit undo moves: before a move is
/// applied, it produces its own inverse from the current working state.
///
/// # Contract
///
/// - `create_undo_move` MUST be called before `do_move`: it captures the
///   pre-move values the inverse needs.
/// - `do_move` mutates exactly the declared (entity, variable) pairs and
///   nothing else.
/// - Applying a move and then its undo move leaves the working solution
///   (and its recomputed score) bit-for-bit identical to before the move.
///   The engine relies on this round trip to evaluate candidates without
///   committing to them.
pub trait Move<S: PlanningSolution>: Send + Sync + Debug {
    /// Returns true if this move can be executed in the current state.
    ///
    /// A move is not doable when it would not change anything (e.g., the
    /// variable already holds the target value).
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool;

    /// Builds the inverse of this move from the current working state.
    ///
    /// Must be called before `do_move`.
    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self
    where
        Self: Sized;

    /// Executes this move, modifying the working solution through the
    /// score director's change notifications.
    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D);

    /// Returns the entity indices involved in this move.
    fn entity_indices(&self) -> &[usize];

    /// Returns the variable name this move affects.
    fn variable_name(&self) -> &str;
}
