//! Value selectors for enumerating candidate values of one variable.

use std::cell::RefCell;
use std::fmt::Debug;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use plancraft_core::domain::{PlanningSolution, ValueRangeProvider};
use plancraft_scoring::ScoreDirector;

use super::SelectorLifecycle;

/// Trait for selecting candidate values for one planning variable.
///
/// Values are yielded as `Option<V>`: `None` is the null sentinel of a
/// nullable value range, and maps to an unassignment move.
pub trait ValueSelector<S: PlanningSolution, V>: SelectorLifecycle + Send + Debug {
    /// Returns an iterator over candidate values for the given entity.
    fn iter_values<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
        entity_index: usize,
    ) -> Box<dyn Iterator<Item = Option<V>> + 'a>;

    /// Returns the approximate number of candidate values for the entity.
    fn size<D: ScoreDirector<S>>(&self, score_director: &D, entity_index: usize) -> usize;

    /// Returns true if this selector may yield values indefinitely.
    fn is_never_ending(&self) -> bool {
        false
    }
}

/// A value selector over a fixed list of values.
#[derive(Debug, Clone)]
pub struct StaticValueSelector<V> {
    values: Vec<V>,
}

impl<V> StaticValueSelector<V> {
    /// Creates a new static value selector.
    pub fn new(values: Vec<V>) -> Self {
        Self { values }
    }
}

impl<V> SelectorLifecycle for StaticValueSelector<V> {}

impl<S, V> ValueSelector<S, V> for StaticValueSelector<V>
where
    S: PlanningSolution,
    V: Clone + Send + Sync + Debug + 'static,
{
    fn iter_values<'a, D: ScoreDirector<S>>(
        &'a self,
        _score_director: &'a D,
        _entity_index: usize,
    ) -> Box<dyn Iterator<Item = Option<V>> + 'a> {
        Box::new(self.values.iter().cloned().map(Some))
    }

    fn size<D: ScoreDirector<S>>(&self, _score_director: &D, _entity_index: usize) -> usize {
        self.values.len()
    }
}

/// A value selector backed by a [`ValueRangeProvider`].
///
/// The provider is consulted against the current working solution, so
/// solution-derived ranges stay up to date with committed moves.
pub struct FromRangeValueSelector<P> {
    provider: P,
}

impl<P> FromRangeValueSelector<P> {
    /// Creates a selector drawing from the given value range provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P> Debug for FromRangeValueSelector<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromRangeValueSelector").finish()
    }
}

impl<P> SelectorLifecycle for FromRangeValueSelector<P> {}

impl<S, V, P> ValueSelector<S, V> for FromRangeValueSelector<P>
where
    S: PlanningSolution,
    V: Clone + Send + Sync + Debug + 'static,
    P: ValueRangeProvider<S, V> + Send,
{
    fn iter_values<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
        _entity_index: usize,
    ) -> Box<dyn Iterator<Item = Option<V>> + 'a> {
        let values = self.provider.get_values(score_director.working_solution());
        Box::new(values.into_iter().map(Some))
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D, _entity_index: usize) -> usize {
        self.provider.value_count(score_director.working_solution())
    }
}

/// Widens an inner selector with the null sentinel.
///
/// Yields `None` first, then the inner values; use for variables whose
/// descriptor allows unassigned.
#[derive(Debug)]
pub struct NullableValueSelector<Inner> {
    inner: Inner,
}

impl<Inner> NullableValueSelector<Inner> {
    /// Creates a nullable wrapper around the inner selector.
    pub fn new(inner: Inner) -> Self {
        Self { inner }
    }
}

impl<Inner: SelectorLifecycle> SelectorLifecycle for NullableValueSelector<Inner> {
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

impl<S, V, Inner> ValueSelector<S, V> for NullableValueSelector<Inner>
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
        Box::new(
            std::iter::once(None).chain(self.inner.iter_values(score_director, entity_index)),
        )
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D, entity_index: usize) -> usize {
        self.inner.size(score_director, entity_index) + 1
    }

    fn is_never_ending(&self) -> bool {
        self.inner.is_never_ending()
    }
}

/// A never-ending selector that draws uniformly from an inner selector's
/// values.
///
/// Iteration never terminates on its own; the consumer must bound it
/// (e.g., a filtering selector's attempt budget or a forager's
/// accepted-count limit).
pub struct RandomValueSelector<Inner> {
    inner: Inner,
    rng: RefCell<ChaCha8Rng>,
}

impl<Inner> RandomValueSelector<Inner> {
    /// Creates a random selector with its own deterministic seed.
    pub fn new(inner: Inner, seed: u64) -> Self {
        Self {
            inner,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl<Inner: Debug> Debug for RandomValueSelector<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomValueSelector")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<Inner: SelectorLifecycle> SelectorLifecycle for RandomValueSelector<Inner> {
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

impl<S, V, Inner> ValueSelector<S, V> for RandomValueSelector<Inner>
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
        let values: Vec<Option<V>> = self
            .inner
            .iter_values(score_director, entity_index)
            .collect();
        if values.is_empty() {
            return Box::new(std::iter::empty());
        }
        let rng = &self.rng;
        Box::new(std::iter::repeat_with(move || {
            let index = rng.borrow_mut().random_range(0..values.len());
            values[index].clone()
        }))
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D, entity_index: usize) -> usize {
        self.inner.size(score_director, entity_index)
    }

    fn is_never_ending(&self) -> bool {
        true
    }
}
