//! ChangeMove - assigns a value to a planning variable.
//!
//! This is the most fundamental move type. It takes a value and assigns
//! it to a planning variable on an entity; its undo move restores the
//! value the variable held before.
//!
//! # Zero-Erasure Design
//!
//! This move stores typed function pointers that operate directly on
//! the solution. No `Arc<dyn>`, no `Box<dyn Any>`, no `downcast_ref`.

use std::fmt::Debug;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use super::Move;

/// A move that assigns a value to an entity's variable.
///
/// `to_value` of `None` unassigns the variable (the null sentinel of a
/// nullable value range).
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `V` - The variable value type
#[derive(Clone, Copy)]
pub struct ChangeMove<S, V> {
    entity_index: usize,
    to_value: Option<V>,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V: Debug> Debug for ChangeMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMove")
            .field("entity_index", &self.entity_index)
            .field("variable_name", &self.variable_name)
            .field("to_value", &self.to_value)
            .finish()
    }
}

impl<S, V> ChangeMove<S, V> {
    /// Creates a new change move with typed function pointers.
    pub fn new(
        entity_index: usize,
        to_value: Option<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_index,
            to_value,
            getter,
            setter,
            variable_name,
        }
    }

    /// Returns the entity index.
    pub fn entity_index(&self) -> usize {
        self.entity_index
    }

    /// Returns the target value.
    pub fn to_value(&self) -> Option<&V> {
        self.to_value.as_ref()
    }
}

impl<S, V> Move<S> for ChangeMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let current = (self.getter)(score_director.working_solution(), self.entity_index);
        match (&current, &self.to_value) {
            (None, None) => false,                      // Both unassigned
            (Some(cur), Some(target)) => cur != target, // Different values
            _ => true,                                  // One assigned, one not
        }
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self {
        // Captures the pre-move value; must run before do_move.
        let from_value = (self.getter)(score_director.working_solution(), self.entity_index);
        ChangeMove {
            entity_index: self.entity_index,
            to_value: from_value,
            getter: self.getter,
            setter: self.setter,
            variable_name: self.variable_name,
        }
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        score_director.before_variable_changed(self.entity_index, self.variable_name);
        (self.setter)(
            score_director.working_solution_mut(),
            self.entity_index,
            self.to_value.clone(),
        );
        score_director.after_variable_changed(self.entity_index, self.variable_name);
    }

    fn entity_indices(&self) -> &[usize] {
        std::slice::from_ref(&self.entity_index)
    }

    fn variable_name(&self) -> &str {
        self.variable_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        get_queen_row, row_sum_director, set_queen_row, uninitialized_solution, Queen,
        NQueensSolution,
    };
    use plancraft_scoring::ScoreDirector;

    type QueenMove = ChangeMove<NQueensSolution, i64>;

    fn change(entity: usize, to: Option<i64>) -> QueenMove {
        ChangeMove::new(entity, to, get_queen_row, set_queen_row, "row")
    }

    #[test]
    fn is_doable_requires_an_actual_change() {
        let mut solution = uninitialized_solution(2);
        solution.queens[0].row = Some(1);
        let director = row_sum_director(solution);

        assert!(change(0, Some(5)).is_doable(&director));
        assert!(!change(0, Some(1)).is_doable(&director));
        assert!(change(0, None).is_doable(&director));
        assert!(!change(1, None).is_doable(&director));
    }

    #[test]
    fn do_move_assigns_the_value() {
        let mut director = row_sum_director(uninitialized_solution(1));
        change(0, Some(5)).do_move(&mut director);
        assert_eq!(get_queen_row(director.working_solution(), 0), Some(5));
    }

    #[test]
    fn undo_round_trip_restores_state_and_score() {
        let mut solution = uninitialized_solution(3);
        solution.queens[1].row = Some(2);
        let mut director = row_sum_director(solution);

        let before_state: Vec<Option<i64>> =
            director.working_solution().queens.iter().map(|q| q.row).collect();
        let before_score = director.calculate_score();

        let m = change(1, Some(7));
        let undo = m.create_undo_move(&director);
        m.do_move(&mut director);
        assert_ne!(director.calculate_score(), before_score);

        undo.do_move(&mut director);
        let after_state: Vec<Option<i64>> =
            director.working_solution().queens.iter().map(|q| q.row).collect();
        assert_eq!(after_state, before_state);
        assert_eq!(director.calculate_score(), before_score);
    }

    #[test]
    fn undo_of_an_unassigned_variable_restores_none() {
        let mut director = row_sum_director(uninitialized_solution(1));

        let m = change(0, Some(3));
        let undo = m.create_undo_move(&director);
        m.do_move(&mut director);
        undo.do_move(&mut director);

        assert_eq!(get_queen_row(director.working_solution(), 0), None);
    }

    #[test]
    fn entity_indices_declare_the_touched_pair() {
        let m = change(3, Some(5));
        assert_eq!(m.entity_indices(), &[3]);
        assert_eq!(m.variable_name(), "row");
    }

    #[test]
    fn moves_survive_partial_boards() {
        // Out-of-range indices are a selector bug, but the setter guards
        // keep them from panicking mid-solve.
        let mut director = row_sum_director(NQueensSolution {
            queens: vec![Queen {
                column: 0,
                row: None,
            }],
            score: None,
        });
        change(9, Some(1)).do_move(&mut director);
        assert_eq!(get_queen_row(director.working_solution(), 9), None);
    }
}
