//! Entity selectors for iterating over planning entities

use std::fmt::Debug;

use plancraft_core::domain::PlanningSolution;
use plancraft_scoring::ScoreDirector;

use super::SelectorLifecycle;

/// A reference to an entity within a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Index of the entity descriptor.
    pub descriptor_index: usize,
    /// Index of the entity within its collection.
    pub entity_index: usize,
}

impl EntityRef {
    /// Creates a new entity reference.
    pub fn new(descriptor_index: usize, entity_index: usize) -> Self {
        Self {
            descriptor_index,
            entity_index,
        }
    }
}

/// Trait for selecting entities from a planning solution.
///
/// Entity selectors provide an iteration order over the entities that
/// the solver will consider for moves.
pub trait EntitySelector<S: PlanningSolution>: SelectorLifecycle + Send + Debug {
    /// Returns an iterator over entity references.
    fn iter<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = EntityRef> + 'a>;

    /// Returns the approximate number of entities.
    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize;

    /// Returns true if this selector may yield entities indefinitely.
    fn is_never_ending(&self) -> bool {
        false
    }
}

/// An entity selector that iterates over all entities from the solution,
/// in collection order.
#[derive(Debug, Clone)]
pub struct FromSolutionEntitySelector {
    descriptor_index: usize,
}

impl FromSolutionEntitySelector {
    /// Creates a new entity selector for the given descriptor index.
    pub fn new(descriptor_index: usize) -> Self {
        Self { descriptor_index }
    }
}

impl SelectorLifecycle for FromSolutionEntitySelector {}

impl<S: PlanningSolution> EntitySelector<S> for FromSolutionEntitySelector {
    fn iter<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = EntityRef> + 'a> {
        let count = score_director.entity_count(self.descriptor_index);
        let desc_idx = self.descriptor_index;
        Box::new((0..count).map(move |i| EntityRef::new(desc_idx, i)))
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        score_director.entity_count(self.descriptor_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{nqueens_director, NQueensSolution};

    #[test]
    fn iterates_all_entities_in_order() {
        let director = nqueens_director(4);
        let selector = FromSolutionEntitySelector::new(0);

        let refs: Vec<_> = selector.iter(&director).collect();
        assert_eq!(refs.len(), 4);
        assert_eq!(refs[0], EntityRef::new(0, 0));
        assert_eq!(refs[3], EntityRef::new(0, 3));
        assert_eq!(EntitySelector::<_>::size(&selector, &director), 4);
        assert!(!EntitySelector::<NQueensSolution>::is_never_ending(
            &selector
        ));
    }

    #[test]
    fn unknown_descriptor_yields_nothing() {
        let director = nqueens_director(4);
        let selector = FromSolutionEntitySelector::new(3);
        assert_eq!(selector.iter(&director).count(), 0);
    }
}
