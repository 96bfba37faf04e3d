//! Selector decorators: caching tiers, sorting, filtering.

mod caching;
mod filtering;
mod sorting;

pub use caching::{
    CachingEntitySelector, CachingMoveSelector, CachingValueSelector, SelectionCacheType,
};
pub use filtering::{FilteringMoveSelector, FilteringValueSelector};
pub use sorting::{SortedEntitySelector, SortedValueSelector, SortingMoveSelector};
