//! Value range providers for planning variables.
//!
//! Value range providers define the possible values that can be assigned to
//! planning variables. They can be static (fixed list) or dynamic (computed
//! from the solution state), and may be composed into unions.

/// Provides values for a planning variable.
///
/// # Type Parameters
///
/// * `S` - The solution type
/// * `V` - The value type (must match the planning variable's type)
///
/// # Example
///
/// ```
/// use plancraft_core::domain::ValueRangeProvider;
///
/// struct NQueens {
///     n: i64,
/// }
///
/// struct RowRange;
///
/// impl ValueRangeProvider<NQueens, i64> for RowRange {
///     fn get_values(&self, solution: &NQueens) -> Vec<i64> {
///         (0..solution.n).collect()
///     }
/// }
///
/// let solution = NQueens { n: 4 };
/// assert_eq!(RowRange.get_values(&solution), vec![0, 1, 2, 3]);
/// assert_eq!(RowRange.value_count(&solution), 4);
/// ```
pub trait ValueRangeProvider<S, V>: Send + Sync {
    /// Returns all possible values for the variable.
    fn get_values(&self, solution: &S) -> Vec<V>;

    /// Returns the number of possible values.
    ///
    /// The default implementation calls `get_values` and returns the length,
    /// but implementations may override this when the count can be computed
    /// without materializing the values.
    fn value_count(&self, solution: &S) -> usize {
        self.get_values(solution).len()
    }

    /// Returns whether the value range is empty.
    fn is_empty(&self, solution: &S) -> bool {
        self.value_count(solution) == 0
    }
}

/// A static value range with a fixed set of values.
pub struct StaticValueRange<V> {
    values: Vec<V>,
}

impl<V> StaticValueRange<V> {
    /// Creates a new static value range.
    pub fn new(values: Vec<V>) -> Self {
        Self { values }
    }
}

impl<S, V> ValueRangeProvider<S, V> for StaticValueRange<V>
where
    S: Send + Sync,
    V: Clone + Send + Sync,
{
    fn get_values(&self, _solution: &S) -> Vec<V> {
        self.values.clone()
    }

    fn value_count(&self, _solution: &S) -> usize {
        self.values.len()
    }
}

/// A value range provider backed by a field in the solution.
///
/// This is the most common case: a `Vec<V>` field that contains the
/// possible values.
pub struct FieldValueRangeProvider<S, V, F>
where
    F: Fn(&S) -> &Vec<V> + Send + Sync,
{
    getter: F,
    _marker: std::marker::PhantomData<fn(&S) -> V>,
}

impl<S, V, F> FieldValueRangeProvider<S, V, F>
where
    F: Fn(&S) -> &Vec<V> + Send + Sync,
{
    /// Creates a new field-based value range provider.
    pub fn new(getter: F) -> Self {
        Self {
            getter,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<S, V, F> ValueRangeProvider<S, V> for FieldValueRangeProvider<S, V, F>
where
    S: Send + Sync,
    V: Clone + Send + Sync,
    F: Fn(&S) -> &Vec<V> + Send + Sync,
{
    fn get_values(&self, solution: &S) -> Vec<V> {
        (self.getter)(solution).clone()
    }

    fn value_count(&self, solution: &S) -> usize {
        (self.getter)(solution).len()
    }
}

/// A value range provider that computes values dynamically.
pub struct ComputedValueRangeProvider<S, V, F>
where
    F: Fn(&S) -> Vec<V> + Send + Sync,
{
    compute: F,
    _marker: std::marker::PhantomData<fn(&S) -> V>,
}

impl<S, V, F> ComputedValueRangeProvider<S, V, F>
where
    F: Fn(&S) -> Vec<V> + Send + Sync,
{
    /// Creates a new computed value range provider.
    pub fn new(compute: F) -> Self {
        Self {
            compute,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<S, V, F> ValueRangeProvider<S, V> for ComputedValueRangeProvider<S, V, F>
where
    S: Send + Sync,
    V: Send + Sync,
    F: Fn(&S) -> Vec<V> + Send + Sync,
{
    fn get_values(&self, solution: &S) -> Vec<V> {
        (self.compute)(solution)
    }
}

/// An integer range value provider.
///
/// Efficiently provides a contiguous range of integers without storing them.
pub struct IntRange {
    start: i64,
    end: i64,
}

impl IntRange {
    /// Creates a new integer range [start, end).
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Creates a range from 0 to n (exclusive).
    pub fn from_zero(n: i64) -> Self {
        Self::new(0, n)
    }
}

impl<S> ValueRangeProvider<S, i64> for IntRange
where
    S: Send + Sync,
{
    fn get_values(&self, _solution: &S) -> Vec<i64> {
        (self.start..self.end).collect()
    }

    fn value_count(&self, _solution: &S) -> usize {
        (self.end - self.start).max(0) as usize
    }
}

/// The union of several sub-ranges.
///
/// Values are produced in sub-range order; duplicates across sub-ranges are
/// not removed, matching the semantics of drawing from each provider in turn.
pub struct CompositeValueRange<S, V> {
    ranges: Vec<Box<dyn ValueRangeProvider<S, V>>>,
}

impl<S, V> CompositeValueRange<S, V> {
    /// Creates an empty composite range.
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Adds a sub-range.
    pub fn with_range(mut self, range: Box<dyn ValueRangeProvider<S, V>>) -> Self {
        self.ranges.push(range);
        self
    }

    /// Returns the number of sub-ranges.
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }
}

impl<S, V> Default for CompositeValueRange<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, V> ValueRangeProvider<S, V> for CompositeValueRange<S, V>
where
    S: Send + Sync,
    V: Send + Sync,
{
    fn get_values(&self, solution: &S) -> Vec<V> {
        self.ranges
            .iter()
            .flat_map(|r| r.get_values(solution))
            .collect()
    }

    fn value_count(&self, solution: &S) -> usize {
        self.ranges.iter().map(|r| r.value_count(solution)).sum()
    }
}
