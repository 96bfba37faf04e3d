//! Move selectors: compose entity and value selectors into move streams.

use std::fmt::Debug;
use std::marker::PhantomData;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use crate::heuristic::r#move::{ChangeMove, Move};

use super::{EntitySelector, SelectorLifecycle, ValueSelector};

/// Trait for selecting moves.
///
/// Iteration order is deterministic ("original" order) unless a
/// decorator reorders it. Lifecycle events propagate to child selectors,
/// so each child refreshes its cache at its own tier.
pub trait MoveSelector<S: PlanningSolution, M: Move<S>>:
    SelectorLifecycle + Send + Debug
{
    /// Returns an iterator over candidate moves.
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a>;

    /// Returns the approximate number of moves.
    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize;

    /// Returns true if this selector may yield moves indefinitely.
    fn is_never_ending(&self) -> bool {
        false
    }
}

/// Builds change moves from the cartesian product of one entity selector
/// and one value selector (one variable).
pub struct ChangeMoveSelector<S, V, ES, VS>
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
    _phantom: PhantomData<fn() -> V>,
}

impl<S, V, ES, VS> ChangeMoveSelector<S, V, ES, VS>
where
    S: PlanningSolution,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    /// Creates a new change move selector.
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
            _phantom: PhantomData,
        }
    }
}

impl<S, V, ES, VS> Debug for ChangeMoveSelector<S, V, ES, VS>
where
    S: PlanningSolution,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMoveSelector")
            .field("entity_selector", &self.entity_selector)
            .field("value_selector", &self.value_selector)
            .field("variable_name", &self.variable_name)
            .finish()
    }
}

impl<S, V, ES, VS> SelectorLifecycle for ChangeMoveSelector<S, V, ES, VS>
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

impl<S, V, ES, VS> MoveSelector<S, ChangeMove<S, V>> for ChangeMoveSelector<S, V, ES, VS>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = ChangeMove<S, V>> + 'a> {
        let getter = self.getter;
        let setter = self.setter;
        let variable_name = self.variable_name;
        let value_selector = &self.value_selector;

        Box::new(
            self.entity_selector
                .iter(score_director)
                .flat_map(move |entity_ref| {
                    value_selector
                        .iter_values(score_director, entity_ref.entity_index)
                        .map(move |value| {
                            ChangeMove::new(
                                entity_ref.entity_index,
                                value,
                                getter,
                                setter,
                                variable_name,
                            )
                        })
                }),
        )
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        self.entity_selector
            .iter(score_director)
            .map(|entity_ref| {
                self.value_selector
                    .size(score_director, entity_ref.entity_index)
            })
            .sum()
    }

    fn is_never_ending(&self) -> bool {
        self.entity_selector.is_never_ending() || self.value_selector.is_never_ending()
    }
}

/// Concatenates two move selectors of the same move type.
///
/// Nest unions to combine more than two selectors.
#[derive(Debug)]
pub struct UnionMoveSelector<M, A, B> {
    first: A,
    second: B,
    _phantom: PhantomData<fn() -> M>,
}

impl<M, A, B> UnionMoveSelector<M, A, B> {
    /// Creates a union of two selectors, iterated first-then-second.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _phantom: PhantomData,
        }
    }
}

impl<M, A: SelectorLifecycle, B: SelectorLifecycle> SelectorLifecycle
    for UnionMoveSelector<M, A, B>
{
    fn phase_started(&self) {
        self.first.phase_started();
        self.second.phase_started();
    }
    fn step_started(&self) {
        self.first.step_started();
        self.second.step_started();
    }
    fn step_ended(&self) {
        self.first.step_ended();
        self.second.step_ended();
    }
    fn phase_ended(&self) {
        self.first.phase_ended();
        self.second.phase_ended();
    }
}

impl<S, M, A, B> MoveSelector<S, M> for UnionMoveSelector<M, A, B>
where
    S: PlanningSolution,
    M: Move<S>,
    A: MoveSelector<S, M>,
    B: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        Box::new(
            self.first
                .iter_moves(score_director)
                .chain(self.second.iter_moves(score_director)),
        )
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        self.first.size(score_director) + self.second.size(score_director)
    }

    fn is_never_ending(&self) -> bool {
        self.first.is_never_ending() || self.second.is_never_ending()
    }
}
