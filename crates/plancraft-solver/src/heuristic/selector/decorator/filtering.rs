//! Filtering selector decorators.

use std::fmt::Debug;
use std::marker::PhantomData;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::{MoveSelector, SelectorLifecycle, ValueSelector};

/// Attempt budget multiplier for filtering over a never-ending child.
const BAIL_OUT_ATTEMPT_FACTOR: usize = 10;

/// Filters the values of an inner selector through a predicate.
///
/// The predicate receives the working solution and the candidate value;
/// use it for restrictions like "initialized values only" on chained
/// variables (reject candidate entities whose own chaining variable is
/// still unassigned).
///
/// When the child selector is never-ending, iteration tracks an attempt
/// budget of `child_size * 10`. Once the budget is spent the iterator
/// logs a bail-out and terminates, yielding an empty result for that
/// entity rather than spinning forever.
pub struct FilteringValueSelector<S, V, Inner> {
    inner: Inner,
    predicate: fn(&S, &Option<V>) -> bool,
    _phantom: PhantomData<fn() -> V>,
}

impl<S, V, Inner> FilteringValueSelector<S, V, Inner> {
    /// Creates a filtering wrapper around the inner selector.
    pub fn new(inner: Inner, predicate: fn(&S, &Option<V>) -> bool) -> Self {
        Self {
            inner,
            predicate,
            _phantom: PhantomData,
        }
    }
}

impl<S, V, Inner: Debug> Debug for FilteringValueSelector<S, V, Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteringValueSelector")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<S, V, Inner: SelectorLifecycle> SelectorLifecycle for FilteringValueSelector<S, V, Inner> {
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

impl<S, V, Inner> ValueSelector<S, V> for FilteringValueSelector<S, V, Inner>
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
        let predicate = self.predicate;
        let solution = score_director.working_solution();
        let inner = self.inner.iter_values(score_director, entity_index);

        if self.inner.is_never_ending() {
            let budget = self
                .inner
                .size(score_director, entity_index)
                .saturating_mul(BAIL_OUT_ATTEMPT_FACTOR);
            Box::new(BailOutIter {
                inner,
                solution,
                predicate,
                entity_index,
                attempts: 0,
                budget,
            })
        } else {
            Box::new(inner.filter(move |value| predicate(solution, value)))
        }
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D, entity_index: usize) -> usize {
        // Upper bound; the predicate can only shrink it.
        self.inner.size(score_director, entity_index)
    }

    fn is_never_ending(&self) -> bool {
        // The attempt budget makes even a never-ending child finite.
        false
    }
}

/// Iterator that gives up after a fixed number of rejected attempts.
struct BailOutIter<'a, S, V, I> {
    inner: I,
    solution: &'a S,
    predicate: fn(&S, &Option<V>) -> bool,
    entity_index: usize,
    attempts: usize,
    budget: usize,
}

impl<'a, S, V, I> Iterator for BailOutIter<'a, S, V, I>
where
    I: Iterator<Item = Option<V>>,
{
    type Item = Option<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.attempts >= self.budget {
                tracing::warn!(
                    entity_index = self.entity_index,
                    attempts = self.attempts,
                    "Filtered value selector exhausted its attempt budget; \
                     yielding no value for this entity"
                );
                return None;
            }
            let candidate = self.inner.next()?;
            self.attempts += 1;
            if (self.predicate)(self.solution, &candidate) {
                return Some(candidate);
            }
        }
    }
}

/// Filters the moves of an inner selector through a predicate.
///
/// Only meaningful over finite children; wrap never-ending children in a
/// caching or filtering value selector first.
pub struct FilteringMoveSelector<S, M, Inner> {
    inner: Inner,
    predicate: fn(&S, &M) -> bool,
}

impl<S, M, Inner> FilteringMoveSelector<S, M, Inner> {
    /// Creates a filtering wrapper around the inner selector.
    pub fn new(inner: Inner, predicate: fn(&S, &M) -> bool) -> Self {
        Self { inner, predicate }
    }
}

impl<S, M, Inner: Debug> Debug for FilteringMoveSelector<S, M, Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteringMoveSelector")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<S, M, Inner: SelectorLifecycle> SelectorLifecycle for FilteringMoveSelector<S, M, Inner> {
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

impl<S, M, Inner> MoveSelector<S, M> for FilteringMoveSelector<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        let predicate = self.predicate;
        let solution = score_director.working_solution();
        Box::new(
            self.inner
                .iter_moves(score_director)
                .filter(move |m| predicate(solution, m)),
        )
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        self.inner.size(score_director)
    }

    fn is_never_ending(&self) -> bool {
        self.inner.is_never_ending()
    }
}
