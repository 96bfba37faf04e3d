//! CompositeMove - applies several moves of the same type as one unit.

use std::fmt::Debug;

use smallvec::SmallVec;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use super::Move;

/// A move composed of several part moves, applied in order.
///
/// The undo move applies the parts' undo moves in reverse order. The
/// parts must touch disjoint (entity, variable) pairs: all undo moves are
/// captured against the same pre-move state, so a later part overwriting
/// an earlier part's pair would corrupt the round trip.
pub struct CompositeMove<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    moves: SmallVec<[M; 4]>,
    entity_indices: SmallVec<[usize; 4]>,
    _phantom: std::marker::PhantomData<fn() -> S>,
}

impl<S, M> CompositeMove<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    /// Creates a composite from the given part moves.
    pub fn new(moves: Vec<M>) -> Self {
        let entity_indices = moves
            .iter()
            .flat_map(|m| m.entity_indices().iter().copied())
            .collect();
        Self {
            moves: SmallVec::from_vec(moves),
            entity_indices,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the part moves.
    pub fn moves(&self) -> &[M] {
        &self.moves
    }
}

impl<S, M> Debug for CompositeMove<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMove")
            .field("moves", &self.moves.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<S, M> Move<S> for CompositeMove<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        !self.moves.is_empty() && self.moves.iter().all(|m| m.is_doable(score_director))
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self {
        let undos: Vec<M> = self
            .moves
            .iter()
            .rev()
            .map(|m| m.create_undo_move(score_director))
            .collect();
        CompositeMove::new(undos)
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        for m in &self.moves {
            m.do_move(score_director);
        }
    }

    fn entity_indices(&self) -> &[usize] {
        &self.entity_indices
    }

    fn variable_name(&self) -> &str {
        self.moves
            .first()
            .map(|m| m.variable_name())
            .unwrap_or("composite")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::r#move::ChangeMove;
    use crate::test_utils::{
        get_queen_row, row_sum_director, set_queen_row, uninitialized_solution, NQueensSolution,
    };
    use plancraft_scoring::ScoreDirector;

    type QueenMove = ChangeMove<NQueensSolution, i64>;

    fn change(entity: usize, to: i64) -> QueenMove {
        ChangeMove::new(entity, Some(to), get_queen_row, set_queen_row, "row")
    }

    #[test]
    fn applies_parts_in_order() {
        let mut director = row_sum_director(uninitialized_solution(3));
        let composite = CompositeMove::new(vec![change(0, 1), change(2, 5)]);

        assert!(composite.is_doable(&director));
        assert_eq!(composite.entity_indices(), &[0, 2]);

        composite.do_move(&mut director);
        assert_eq!(get_queen_row(director.working_solution(), 0), Some(1));
        assert_eq!(get_queen_row(director.working_solution(), 2), Some(5));
    }

    #[test]
    fn undo_round_trip_over_disjoint_pairs() {
        let mut solution = uninitialized_solution(3);
        solution.queens[0].row = Some(9);
        let mut director = row_sum_director(solution);
        let before_score = director.calculate_score();

        let composite = CompositeMove::new(vec![change(0, 1), change(1, 2)]);
        let undo = composite.create_undo_move(&director);
        composite.do_move(&mut director);
        undo.do_move(&mut director);

        assert_eq!(get_queen_row(director.working_solution(), 0), Some(9));
        assert_eq!(get_queen_row(director.working_solution(), 1), None);
        assert_eq!(director.calculate_score(), before_score);
    }

    #[test]
    fn empty_composite_is_not_doable() {
        let director = row_sum_director(uninitialized_solution(1));
        let composite: CompositeMove<NQueensSolution, QueenMove> = CompositeMove::new(vec![]);
        assert!(!composite.is_doable(&director));
    }
}
