//! Sorting selector decorators.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::marker::PhantomData;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::{
    EntityRef, EntitySelector, MoveSelector, SelectorLifecycle, ValueSelector,
};

/// Sorts an entity selector by a difficulty comparator.
///
/// The comparator receives the working solution and two entity indices;
/// sort descending for a "hardest first" construction order.
pub struct SortedEntitySelector<S, Inner> {
    inner: Inner,
    comparator: fn(&S, usize, usize) -> Ordering,
}

impl<S, Inner> SortedEntitySelector<S, Inner> {
    /// Creates a sorting wrapper around the inner selector.
    pub fn new(inner: Inner, comparator: fn(&S, usize, usize) -> Ordering) -> Self {
        Self { inner, comparator }
    }
}

impl<S, Inner: Debug> Debug for SortedEntitySelector<S, Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedEntitySelector")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<S, Inner: SelectorLifecycle> SelectorLifecycle for SortedEntitySelector<S, Inner> {
    fn phase_started(&self) {
        self.inner.phase_started();
    }
    fn step_started(&self) {
        self.inner.step_started();
    }
    fn step_ended(&self) {
        self.inner.step_ended();
    }
    fn phase_ended(&self) {
        self.inner.phase_ended();
    }
}

impl<S, Inner> EntitySelector<S> for SortedEntitySelector<S, Inner>
where
    S: PlanningSolution,
    Inner: EntitySelector<S>,
{
    fn iter<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = EntityRef> + 'a> {
        let mut refs: Vec<EntityRef> = self.inner.iter(score_director).collect();
        let solution = score_director.working_solution();
        let comparator = self.comparator;
        refs.sort_by(|a, b| comparator(solution, a.entity_index, b.entity_index));
        Box::new(refs.into_iter())
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        self.inner.size(score_director)
    }
}

/// Sorts a value selector by a strength function.
///
/// Weakest values come first (ascending strength); the null sentinel
/// sorts before everything. Wrap in reverse order via a negating
/// strength function for "strongest first".
pub struct SortedValueSelector<S, V, Inner> {
    inner: Inner,
    strength: fn(&S, &V) -> i64,
    _phantom: PhantomData<fn() -> V>,
}

impl<S, V, Inner> SortedValueSelector<S, V, Inner> {
    /// Creates a sorting wrapper around the inner selector.
    pub fn new(inner: Inner, strength: fn(&S, &V) -> i64) -> Self {
        Self {
            inner,
            strength,
            _phantom: PhantomData,
        }
    }
}

impl<S, V, Inner: Debug> Debug for SortedValueSelector<S, V, Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedValueSelector")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<S, V, Inner: SelectorLifecycle> SelectorLifecycle for SortedValueSelector<S, V, Inner> {
    fn phase_started(&self) {
        self.inner.phase_started();
    }
    fn step_started(&self) {
        self.inner.step_started();
    }
    fn step_ended(&self) {
        self.inner.step_ended();
    }
    fn phase_ended(&self) {
        self.inner.phase_ended();
    }
}

impl<S, V, Inner> ValueSelector<S, V> for SortedValueSelector<S, V, Inner>
where
    S: PlanningSolution,
    V: Clone + Send + Sync + Debug + 'static,
    Inner: ValueSelector<S, V>,
{
    fn iter_values<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
        entity_index: usize,
    ) -> Box<dyn Iterator<Item = Option<V>> + 'a> {
        let mut values: Vec<Option<V>> = self
            .inner
            .iter_values(score_director, entity_index)
            .collect();
        let solution = score_director.working_solution();
        let strength = self.strength;
        values.sort_by_key(|v| match v {
            None => i64::MIN,
            Some(value) => strength(solution, value),
        });
        Box::new(values.into_iter())
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D, entity_index: usize) -> usize {
        self.inner.size(score_director, entity_index)
    }
}

/// Sorts a move selector by a comparator.
pub struct SortingMoveSelector<S, M, Inner> {
    inner: Inner,
    comparator: fn(&M, &M) -> Ordering,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, M, Inner> SortingMoveSelector<S, M, Inner> {
    /// Creates a sorting wrapper around the inner selector.
    pub fn new(inner: Inner, comparator: fn(&M, &M) -> Ordering) -> Self {
        Self {
            inner,
            comparator,
            _phantom: PhantomData,
        }
    }
}

impl<S, M, Inner: Debug> Debug for SortingMoveSelector<S, M, Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortingMoveSelector")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<S, M, Inner: SelectorLifecycle> SelectorLifecycle for SortingMoveSelector<S, M, Inner> {
    fn phase_started(&self) {
        self.inner.phase_started();
    }
    fn step_started(&self) {
        self.inner.step_started();
    }
    fn step_ended(&self) {
        self.inner.step_ended();
    }
    fn phase_ended(&self) {
        self.inner.phase_ended();
    }
}

impl<S, M, Inner> MoveSelector<S, M> for SortingMoveSelector<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        let mut moves: Vec<M> = self.inner.iter_moves(score_director).collect();
        moves.sort_by(self.comparator);
        Box::new(moves.into_iter())
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        self.inner.size(score_director)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::selector::{FromSolutionEntitySelector, StaticValueSelector};
    use crate::test_utils::{row_sum_director, uninitialized_solution, NQueensSolution};

    fn by_column_descending(s: &NQueensSolution, a: usize, b: usize) -> Ordering {
        s.queens[b].column.cmp(&s.queens[a].column)
    }

    #[test]
    fn entities_sort_by_difficulty_comparator() {
        let director = row_sum_director(uninitialized_solution(3));
        let selector =
            SortedEntitySelector::new(FromSolutionEntitySelector::new(0), by_column_descending);

        let order: Vec<usize> = selector.iter(&director).map(|r| r.entity_index).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    fn identity_strength(_s: &NQueensSolution, v: &i64) -> i64 {
        *v
    }

    #[test]
    fn values_sort_weakest_first_with_null_leading() {
        let director = row_sum_director(uninitialized_solution(1));
        let inner = crate::heuristic::selector::NullableValueSelector::new(
            StaticValueSelector::new(vec![5i64, 1, 3]),
        );
        let selector = SortedValueSelector::new(inner, identity_strength);

        let values: Vec<Option<i64>> = selector.iter_values(&director, 0).collect();
        assert_eq!(values, vec![None, Some(1), Some(3), Some(5)]);
    }
}
