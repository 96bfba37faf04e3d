//! Entity placers for the construction heuristic.
//!
//! A placer yields, for each not-yet-initialized entity in turn, a
//! `Placement`: the ordered candidate moves that could initialize it.

use std::fmt::Debug;
use std::marker::PhantomData;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::heuristic::r#move::{ChangeMove, Move};
use crate::heuristic::selector::{EntityRef, EntitySelector, SelectorLifecycle, ValueSelector};

/// An entity that needs a value assigned, with its ordered candidate moves.
pub struct Placement<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    /// The entity reference.
    pub entity_ref: EntityRef,
    /// Candidate moves for this placement, in evaluation order.
    pub moves: Vec<M>,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, M> Placement<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    /// Creates a new placement.
    pub fn new(entity_ref: EntityRef, moves: Vec<M>) -> Self {
        Self {
            entity_ref,
            moves,
            _phantom: PhantomData,
        }
    }

    /// Returns true if there are no candidate moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns the number of candidate moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }
}

impl<S, M> Debug for Placement<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Placement")
            .field("entity_ref", &self.entity_ref)
            .field("move_count", &self.moves.len())
            .finish()
    }
}

/// Trait for placing entities during construction.
///
/// Placements are produced lazily, one per step, against the current
/// working solution; `reset` rewinds the placer at phase start. The
/// owning phase forwards its [`SelectorLifecycle`] events here so the
/// underlying selectors refresh their caches at the right tier.
pub trait EntityPlacer<S, M>: SelectorLifecycle + Send + Debug
where
    S: PlanningSolution,
    M: Move<S>,
{
    /// Rewinds to the first entity. Called when the owning phase starts.
    fn reset(&mut self);

    /// Returns the next placement, or `None` when every entity has been
    /// visited.
    fn next_placement<D: ScoreDirector<S>>(
        &mut self,
        score_director: &D,
    ) -> Option<Placement<S, M>>;
}

/// A queued entity placer that visits entities in selector order.
///
/// Initialized entities are skipped. For each uninitialized entity, a
/// change move is generated per candidate value; when the variable allows
/// unassigned, an explicit unassignment candidate is appended so "leave
/// it null" competes on score like any other value.
///
/// An entity whose value selector yields nothing still produces an empty
/// placement: the step then completes with no move selected, which is not
/// an error.
pub struct QueuedEntityPlacer<S, V, ES, VS>
where
    S: PlanningSolution,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    entity_selector: ES,
    value_selector: VS,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
    allows_unassigned: bool,
    /// Position of the next entity to visit, in selector order.
    cursor: usize,
    _phantom: PhantomData<fn() -> V>,
}

impl<S, V, ES, VS> QueuedEntityPlacer<S, V, ES, VS>
where
    S: PlanningSolution,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    /// Creates a new queued entity placer.
    pub fn new(
        entity_selector: ES,
        value_selector: VS,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_selector,
            value_selector,
            getter,
            setter,
            variable_name,
            allows_unassigned: false,
            cursor: 0,
            _phantom: PhantomData,
        }
    }

    /// Also offers an explicit unassignment candidate per placement.
    pub fn with_allows_unassigned(mut self, allows: bool) -> Self {
        self.allows_unassigned = allows;
        self
    }
}

impl<S, V, ES, VS> Debug for QueuedEntityPlacer<S, V, ES, VS>
where
    S: PlanningSolution,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedEntityPlacer")
            .field("entity_selector", &self.entity_selector)
            .field("value_selector", &self.value_selector)
            .field("variable_name", &self.variable_name)
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<S, V, ES, VS> SelectorLifecycle for QueuedEntityPlacer<S, V, ES, VS>
where
    S: PlanningSolution,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    fn phase_started(&self) {
        self.entity_selector.phase_started();
        self.value_selector.phase_started();
    }
    fn step_started(&self) {
        self.entity_selector.step_started();
        self.value_selector.step_started();
    }
    fn step_ended(&self) {
        self.entity_selector.step_ended();
        self.value_selector.step_ended();
    }
    fn phase_ended(&self) {
        self.entity_selector.phase_ended();
        self.value_selector.phase_ended();
    }
}

impl<S, V, ES, VS> EntityPlacer<S, ChangeMove<S, V>> for QueuedEntityPlacer<S, V, ES, VS>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn next_placement<D: ScoreDirector<S>>(
        &mut self,
        score_director: &D,
    ) -> Option<Placement<S, ChangeMove<S, V>>> {
        loop {
            let entity_ref = self
                .entity_selector
                .iter(score_director)
                .nth(self.cursor)?;
            self.cursor += 1;

            // Skip entities that are already initialized.
            let current = (self.getter)(score_director.working_solution(), entity_ref.entity_index);
            if current.is_some() {
                continue;
            }

            let mut moves: Vec<ChangeMove<S, V>> = self
                .value_selector
                .iter_values(score_director, entity_ref.entity_index)
                .filter(|value| value.is_some() || self.allows_unassigned)
                .map(|value| {
                    ChangeMove::new(
                        entity_ref.entity_index,
                        value,
                        self.getter,
                        self.setter,
                        self.variable_name,
                    )
                })
                .collect();

            if self.allows_unassigned
                && !moves.iter().any(|m| m.to_value().is_none())
            {
                moves.push(ChangeMove::new(
                    entity_ref.entity_index,
                    None,
                    self.getter,
                    self.setter,
                    self.variable_name,
                ));
            }

            return Some(Placement::new(entity_ref, moves));
        }
    }
}

/// A placer that orders placements by a difficulty comparator.
///
/// Materializes the inner placer's placements on the first call after a
/// reset and replays them sorted, e.g. hardest entity first for a
/// first-fit-decreasing construction.
pub struct SortedEntityPlacer<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: EntityPlacer<S, M>,
{
    inner: Inner,
    comparator: fn(&S, usize, usize) -> std::cmp::Ordering,
    pending: Option<Vec<Placement<S, M>>>,
}

impl<S, M, Inner> SortedEntityPlacer<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: EntityPlacer<S, M>,
{
    /// Creates a sorted wrapper around the inner placer.
    pub fn new(inner: Inner, comparator: fn(&S, usize, usize) -> std::cmp::Ordering) -> Self {
        Self {
            inner,
            comparator,
            pending: None,
        }
    }
}

impl<S, M, Inner> Debug for SortedEntityPlacer<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: EntityPlacer<S, M>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedEntityPlacer")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<S, M, Inner> SelectorLifecycle for SortedEntityPlacer<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: EntityPlacer<S, M>,
{
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

impl<S, M, Inner> EntityPlacer<S, M> for SortedEntityPlacer<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: EntityPlacer<S, M>,
{
    fn reset(&mut self) {
        self.inner.reset();
        self.pending = None;
    }

    fn next_placement<D: ScoreDirector<S>>(
        &mut self,
        score_director: &D,
    ) -> Option<Placement<S, M>> {
        if self.pending.is_none() {
            let mut placements = Vec::new();
            while let Some(placement) = self.inner.next_placement(score_director) {
                placements.push(placement);
            }
            let solution = score_director.working_solution();
            let comparator = self.comparator;
            placements.sort_by(|a, b| {
                comparator(
                    solution,
                    a.entity_ref.entity_index,
                    b.entity_ref.entity_index,
                )
            });
            // Pop from the back; store reversed.
            placements.reverse();
            self.pending = Some(placements);
        }
        self.pending.as_mut().and_then(|p| p.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::selector::{FromSolutionEntitySelector, StaticValueSelector};
    use crate::test_utils::{
        get_queen_row, row_sum_director, set_queen_row, uninitialized_solution, NQueensSolution,
    };

    type QueenPlacer =
        QueuedEntityPlacer<NQueensSolution, i64, FromSolutionEntitySelector, StaticValueSelector<i64>>;

    fn placer(values: Vec<i64>) -> QueenPlacer {
        QueuedEntityPlacer::new(
            FromSolutionEntitySelector::new(0),
            StaticValueSelector::new(values),
            get_queen_row,
            set_queen_row,
            "row",
        )
    }

    #[test]
    fn yields_one_placement_per_uninitialized_entity() {
        let director = row_sum_director(uninitialized_solution(3));
        let mut p = placer(vec![0, 1, 2]);
        p.reset();

        let mut seen = Vec::new();
        while let Some(placement) = p.next_placement(&director) {
            assert_eq!(placement.len(), 3);
            seen.push(placement.entity_ref.entity_index);
        }
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn skips_initialized_entities() {
        let mut solution = uninitialized_solution(3);
        solution.queens[0].row = Some(1);
        solution.queens[2].row = Some(0);
        let director = row_sum_director(solution);

        let mut p = placer(vec![0, 1, 2]);
        p.reset();

        let placement = p.next_placement(&director).unwrap();
        assert_eq!(placement.entity_ref.entity_index, 1);
        assert!(p.next_placement(&director).is_none());
    }

    #[test]
    fn empty_value_range_gives_an_empty_placement() {
        let director = row_sum_director(uninitialized_solution(1));
        let mut p = placer(vec![]);
        p.reset();

        let placement = p.next_placement(&director).unwrap();
        assert!(placement.is_empty());
    }

    #[test]
    fn nullable_variable_gets_an_unassignment_candidate() {
        let director = row_sum_director(uninitialized_solution(1));
        let mut p = placer(vec![4]).with_allows_unassigned(true);
        p.reset();

        let placement = p.next_placement(&director).unwrap();
        let values: Vec<Option<i64>> =
            placement.moves.iter().map(|m| m.to_value().copied()).collect();
        assert_eq!(values, vec![Some(4), None]);
    }

    #[test]
    fn reset_rewinds_the_cursor() {
        let director = row_sum_director(uninitialized_solution(2));
        let mut p = placer(vec![0]);
        p.reset();
        assert_eq!(
            p.next_placement(&director).unwrap().entity_ref.entity_index,
            0
        );
        p.reset();
        assert_eq!(
            p.next_placement(&director).unwrap().entity_ref.entity_index,
            0
        );
    }

    #[test]
    fn sorted_placer_orders_by_difficulty() {
        let director = row_sum_director(uninitialized_solution(3));

        fn hardest_first(s: &NQueensSolution, a: usize, b: usize) -> std::cmp::Ordering {
            s.queens[b].column.cmp(&s.queens[a].column)
        }

        let mut sorted = SortedEntityPlacer::new(placer(vec![0]), hardest_first);
        sorted.reset();

        let mut order = Vec::new();
        while let Some(placement) = sorted.next_placement(&director) {
            order.push(placement.entity_ref.entity_index);
        }
        assert_eq!(order, vec![2, 1, 0]);
    }
}
