//! Simple score director with full recomputation.

use plancraft_core::domain::{PlanningSolution, SolutionDescriptor, VariableListener};

use super::traits::ScoreDirector;

/// A score director that recomputes the score from scratch on every call.
///
/// This is the easiest director to implement: provide a closure that maps
/// the solution to a score. It is correct by construction but does not
/// scale to large problems; use [`super::IncrementalScoreDirector`] when
/// score deltas can be maintained cheaply.
///
/// # Example
///
/// ```
/// use plancraft_core::domain::{PlanningSolution, SolutionDescriptor, EntityDescriptor, VariableDescriptor};
/// use plancraft_core::score::SimpleScore;
/// use plancraft_scoring::{ScoreDirector, SimpleScoreDirector};
///
/// #[derive(Clone)]
/// struct Sol {
///     values: Vec<Option<i64>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for Sol {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// fn value_count(s: &Sol) -> usize { s.values.len() }
///
/// let descriptor = SolutionDescriptor::<Sol>::builder("Sol")
///     .entity(
///         EntityDescriptor::new("Value", value_count)
///             .with_variable(VariableDescriptor::genuine("value").with_value_range("range")),
///     )
///     .build()
///     .unwrap();
///
/// let solution = Sol { values: vec![Some(1), Some(2)], score: None };
/// let mut director = SimpleScoreDirector::new(solution, descriptor, |s: &Sol| {
///     SimpleScore::of(s.values.iter().flatten().sum())
/// });
/// assert_eq!(director.calculate_score(), SimpleScore::of(3));
/// ```
pub struct SimpleScoreDirector<S, F>
where
    S: PlanningSolution,
    F: Fn(&S) -> S::Score + Send,
{
    solution: S,
    descriptor: SolutionDescriptor<S>,
    calculator: F,
    listeners: Vec<VariableListener<S>>,
    calculation_count: u64,
}

impl<S, F> SimpleScoreDirector<S, F>
where
    S: PlanningSolution,
    F: Fn(&S) -> S::Score + Send,
{
    /// Creates a new director for the given solution and calculator.
    pub fn new(solution: S, descriptor: SolutionDescriptor<S>, calculator: F) -> Self {
        Self {
            solution,
            descriptor,
            calculator,
            listeners: Vec::new(),
            calculation_count: 0,
        }
    }

    /// Registers shadow variable listeners, in invocation order.
    pub fn with_listeners(mut self, listeners: Vec<VariableListener<S>>) -> Self {
        self.listeners = listeners;
        self
    }
}

impl<S, F> ScoreDirector<S> for SimpleScoreDirector<S, F>
where
    S: PlanningSolution,
    F: Fn(&S) -> S::Score + Send,
{
    fn working_solution(&self) -> &S {
        &self.solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        &mut self.solution
    }

    fn calculate_score(&mut self) -> S::Score {
        self.calculation_count += 1;
        (self.calculator)(&self.solution)
    }

    fn calculate_score_uncached(&mut self) -> S::Score {
        self.calculate_score()
    }

    fn descriptor(&self) -> &SolutionDescriptor<S> {
        &self.descriptor
    }

    fn clone_working_solution(&self) -> S {
        self.solution.clone()
    }

    fn before_variable_changed(&mut self, _entity_index: usize, _variable_name: &str) {}

    fn after_variable_changed(&mut self, _entity_index: usize, _variable_name: &str) {}

    fn trigger_variable_listeners(&mut self) {
        for listener in &self.listeners {
            (listener.update)(&mut self.solution);
        }
    }

    fn score_calculation_count(&self) -> u64 {
        self.calculation_count
    }
}
