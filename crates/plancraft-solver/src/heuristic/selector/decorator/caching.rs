//! Caching selector decorators.
//!
//! Each decorator materializes its inner selector's output and replays it
//! until its cache tier says to refresh. Lifecycle hooks drive the
//! refresh: a phase-tier cache survives step boundaries, a step-tier
//! cache is cleared at every step start, and the just-in-time tier never
//! caches at all.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::marker::PhantomData;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::{
    EntityRef, EntitySelector, MoveSelector, SelectorLifecycle, ValueSelector,
};

/// Granularity at which a caching selector refreshes its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionCacheType {
    /// Recompute on every call; no caching.
    JustInTime,
    /// Recompute once per step.
    #[default]
    Step,
    /// Recompute once per phase.
    Phase,
}

/// Caches the entity references produced by an inner entity selector.
pub struct CachingEntitySelector<Inner> {
    inner: Inner,
    cache_type: SelectionCacheType,
    cache: RefCell<Option<Vec<EntityRef>>>,
}

impl<Inner> CachingEntitySelector<Inner> {
    /// Creates a caching wrapper with the given tier.
    pub fn new(inner: Inner, cache_type: SelectionCacheType) -> Self {
        Self {
            inner,
            cache_type,
            cache: RefCell::new(None),
        }
    }

    /// Returns the cache tier.
    pub fn cache_type(&self) -> SelectionCacheType {
        self.cache_type
    }
}

impl<Inner: Debug> Debug for CachingEntitySelector<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingEntitySelector")
            .field("inner", &self.inner)
            .field("cache_type", &self.cache_type)
            .field("cached", &self.cache.borrow().is_some())
            .finish()
    }
}

impl<Inner: SelectorLifecycle> SelectorLifecycle for CachingEntitySelector<Inner> {
    fn phase_started(&self) {
        *self.cache.borrow_mut() = None;
        self.inner.phase_started();
    }
    fn step_started(&self) {
        if self.cache_type == SelectionCacheType::Step {
            *self.cache.borrow_mut() = None;
        }
        self.inner.step_started();
    }
    fn step_ended(&self) {
        self.inner.step_ended();
    }
    fn phase_ended(&self) {
        *self.cache.borrow_mut() = None;
        self.inner.phase_ended();
    }
}

impl<S, Inner> EntitySelector<S> for CachingEntitySelector<Inner>
where
    S: PlanningSolution,
    Inner: EntitySelector<S>,
{
    fn iter<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = EntityRef> + 'a> {
        if self.cache_type == SelectionCacheType::JustInTime {
            return self.inner.iter(score_director);
        }
        {
            let mut cache = self.cache.borrow_mut();
            if cache.is_none() {
                *cache = Some(self.inner.iter(score_director).collect());
            }
        }
        let refs = self.cache.borrow().as_ref().unwrap().clone();
        Box::new(refs.into_iter())
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        match self.cache.borrow().as_ref() {
            Some(refs) => refs.len(),
            None => self.inner.size(score_director),
        }
    }
}

/// Caches the values produced by an inner value selector, per entity.
pub struct CachingValueSelector<V, Inner> {
    inner: Inner,
    cache_type: SelectionCacheType,
    cache: RefCell<HashMap<usize, Vec<Option<V>>>>,
}

impl<V, Inner> CachingValueSelector<V, Inner> {
    /// Creates a caching wrapper with the given tier.
    pub fn new(inner: Inner, cache_type: SelectionCacheType) -> Self {
        Self {
            inner,
            cache_type,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<V, Inner: Debug> Debug for CachingValueSelector<V, Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingValueSelector")
            .field("inner", &self.inner)
            .field("cache_type", &self.cache_type)
            .finish()
    }
}

impl<V, Inner: SelectorLifecycle> SelectorLifecycle for CachingValueSelector<V, Inner> {
    fn phase_started(&self) {
        self.cache.borrow_mut().clear();
        self.inner.phase_started();
    }
    fn step_started(&self) {
        if self.cache_type == SelectionCacheType::Step {
            self.cache.borrow_mut().clear();
        }
        self.inner.step_started();
    }
    fn step_ended(&self) {
        self.inner.step_ended();
    }
    fn phase_ended(&self) {
        self.cache.borrow_mut().clear();
        self.inner.phase_ended();
    }
}

impl<S, V, Inner> ValueSelector<S, V> for CachingValueSelector<V, Inner>
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
        if self.cache_type == SelectionCacheType::JustInTime {
            return self.inner.iter_values(score_director, entity_index);
        }
        {
            let mut cache = self.cache.borrow_mut();
            cache.entry(entity_index).or_insert_with(|| {
                self.inner
                    .iter_values(score_director, entity_index)
                    .collect()
            });
        }
        let values = self.cache.borrow()[&entity_index].clone();
        Box::new(values.into_iter())
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D, entity_index: usize) -> usize {
        match self.cache.borrow().get(&entity_index) {
            Some(values) => values.len(),
            None => self.inner.size(score_director, entity_index),
        }
    }
}

/// Caches the moves produced by an inner move selector.
pub struct CachingMoveSelector<S, M, Inner> {
    inner: Inner,
    cache_type: SelectionCacheType,
    cache: RefCell<Option<Vec<M>>>,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, M, Inner> CachingMoveSelector<S, M, Inner> {
    /// Creates a caching wrapper with the given tier.
    pub fn new(inner: Inner, cache_type: SelectionCacheType) -> Self {
        Self {
            inner,
            cache_type,
            cache: RefCell::new(None),
            _phantom: PhantomData,
        }
    }
}

impl<S, M, Inner: Debug> Debug for CachingMoveSelector<S, M, Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingMoveSelector")
            .field("inner", &self.inner)
            .field("cache_type", &self.cache_type)
            .field("cached", &self.cache.borrow().is_some())
            .finish()
    }
}

impl<S, M, Inner: SelectorLifecycle> SelectorLifecycle for CachingMoveSelector<S, M, Inner> {
    fn phase_started(&self) {
        *self.cache.borrow_mut() = None;
        self.inner.phase_started();
    }
    fn step_started(&self) {
        if self.cache_type == SelectionCacheType::Step {
            *self.cache.borrow_mut() = None;
        }
        self.inner.step_started();
    }
    fn step_ended(&self) {
        self.inner.step_ended();
    }
    fn phase_ended(&self) {
        *self.cache.borrow_mut() = None;
        self.inner.phase_ended();
    }
}

impl<S, M, Inner> MoveSelector<S, M> for CachingMoveSelector<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S> + Clone,
    Inner: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        if self.cache_type == SelectionCacheType::JustInTime {
            return self.inner.iter_moves(score_director);
        }
        {
            let mut cache = self.cache.borrow_mut();
            if cache.is_none() {
                *cache = Some(self.inner.iter_moves(score_director).collect());
            }
        }
        let moves = self.cache.borrow().as_ref().unwrap().clone();
        Box::new(moves.into_iter())
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        match self.cache.borrow().as_ref() {
            Some(moves) => moves.len(),
            None => self.inner.size(score_director),
        }
    }

    fn is_never_ending(&self) -> bool {
        // Caching materializes the stream, so it is always finite.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::selector::{
        ChangeMoveSelector, FromSolutionEntitySelector, StaticValueSelector,
    };
    use crate::test_utils::{
        get_queen_row, row_sum_director, set_queen_row, uninitialized_solution, NQueensSolution,
    };
    use plancraft_scoring::ScoreDirector;

    fn caching_move_selector(
        cache_type: SelectionCacheType,
    ) -> CachingMoveSelector<
        NQueensSolution,
        crate::heuristic::r#move::ChangeMove<NQueensSolution, i64>,
        impl MoveSelector<NQueensSolution, crate::heuristic::r#move::ChangeMove<NQueensSolution, i64>>,
    > {
        let inner = ChangeMoveSelector::new(
            FromSolutionEntitySelector::new(0),
            StaticValueSelector::new(vec![0i64, 1]),
            get_queen_row,
            set_queen_row,
            "row",
        );
        CachingMoveSelector::new(inner, cache_type)
    }

    #[test]
    fn step_tier_refreshes_at_step_start() {
        let mut director = row_sum_director(uninitialized_solution(1));
        let selector = caching_move_selector(SelectionCacheType::Step);

        assert_eq!(selector.iter_moves(&director).count(), 2);

        // A committed assignment makes the entity initialized; the cache
        // still replays the stale snapshot until the next step starts.
        set_queen_row(director.working_solution_mut(), 0, Some(0));
        assert_eq!(selector.iter_moves(&director).count(), 2);
        assert_eq!(selector.size(&director), 2);

        selector.step_started();
        let moves: Vec<_> = selector.iter_moves(&director).collect();
        // Move to value 0 is now a no-op but still enumerated; the cache
        // was rebuilt against the current solution.
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn phase_tier_survives_step_boundaries() {
        let director = row_sum_director(uninitialized_solution(2));
        let selector = caching_move_selector(SelectionCacheType::Phase);

        selector.phase_started();
        assert_eq!(selector.iter_moves(&director).count(), 4);
        selector.step_started();
        selector.step_ended();
        // Still cached.
        assert_eq!(selector.size(&director), 4);
        selector.phase_ended();
    }

    #[test]
    fn just_in_time_never_caches() {
        let mut director = row_sum_director(uninitialized_solution(1));
        let selector = caching_move_selector(SelectionCacheType::JustInTime);

        assert_eq!(selector.iter_moves(&director).count(), 2);
        director.working_solution_mut().queens.push(crate::test_utils::Queen {
            column: 1,
            row: None,
        });
        // Sees the new entity immediately, no lifecycle event needed.
        assert_eq!(selector.iter_moves(&director).count(), 4);
    }

    #[test]
    fn caching_entity_selector_counts_from_cache() {
        let director = row_sum_director(uninitialized_solution(3));
        let selector = CachingEntitySelector::new(
            FromSolutionEntitySelector::new(0),
            SelectionCacheType::Step,
        );

        assert_eq!(EntitySelector::<NQueensSolution>::size(&selector, &director), 3);
        assert_eq!(selector.iter(&director).count(), 3);
        assert_eq!(EntitySelector::<NQueensSolution>::size(&selector, &director), 3);
    }

    #[test]
    fn caching_value_selector_caches_per_entity() {
        let director = row_sum_director(uninitialized_solution(2));
        let selector: CachingValueSelector<i64, _> = CachingValueSelector::new(
            StaticValueSelector::new(vec![5i64, 6]),
            SelectionCacheType::Phase,
        );

        assert_eq!(selector.iter_values(&director, 0).count(), 2);
        assert_eq!(selector.iter_values(&director, 1).count(), 2);
        assert_eq!(
            ValueSelector::<NQueensSolution, i64>::size(&selector, &director, 0),
            2
        );
    }
}
