//! Incremental score director.

use plancraft_core::domain::{PlanningSolution, SolutionDescriptor, VariableListener};

use super::traits::ScoreDirector;

/// Maintains a score incrementally across variable changes.
///
/// Implementations receive the same before/after notifications the score
/// director receives from moves and keep a running score. `reset` is the
/// from-scratch anchor: it must return the full score of the given
/// solution and discard any internal state.
///
/// The engine verifies deltas against a from-scratch recomputation when
/// running in an assert-enabled environment mode, so a buggy calculator
/// fails fast instead of silently steering the search.
pub trait IncrementalScoreCalculator<S: PlanningSolution>: Send {
    /// Recomputes everything from the given solution and returns the score.
    fn reset(&mut self, solution: &S) -> S::Score;

    /// Called before a variable of the given entity changes.
    ///
    /// The solution still holds the pre-change value; retract its
    /// contribution here.
    fn before_variable_changed(&mut self, solution: &S, entity_index: usize, variable_name: &str);

    /// Called after a variable of the given entity changed.
    ///
    /// The solution holds the post-change value; insert its contribution
    /// and return the updated score.
    fn after_variable_changed(
        &mut self,
        solution: &S,
        entity_index: usize,
        variable_name: &str,
    ) -> S::Score;
}

/// A score director that keeps the score up to date through an
/// [`IncrementalScoreCalculator`], falling back to a full-recompute
/// closure for from-scratch verification.
pub struct IncrementalScoreDirector<S, C, F>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
    F: Fn(&S) -> S::Score + Send,
{
    solution: S,
    descriptor: SolutionDescriptor<S>,
    calculator: C,
    full_calculator: F,
    cached_score: Option<S::Score>,
    listeners: Vec<VariableListener<S>>,
    calculation_count: u64,
}

impl<S, C, F> IncrementalScoreDirector<S, C, F>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
    F: Fn(&S) -> S::Score + Send,
{
    /// Creates a new incremental director.
    ///
    /// `full_calculator` recomputes the score from scratch; it anchors
    /// `calculate_score_uncached` and assert-mode verification.
    pub fn new(
        solution: S,
        descriptor: SolutionDescriptor<S>,
        calculator: C,
        full_calculator: F,
    ) -> Self {
        Self {
            solution,
            descriptor,
            calculator,
            full_calculator,
            cached_score: None,
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

impl<S, C, F> ScoreDirector<S> for IncrementalScoreDirector<S, C, F>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
    F: Fn(&S) -> S::Score + Send,
{
    fn working_solution(&self) -> &S {
        &self.solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        &mut self.solution
    }

    fn calculate_score(&mut self) -> S::Score {
        match self.cached_score {
            Some(score) => score,
            None => {
                self.calculation_count += 1;
                let score = self.calculator.reset(&self.solution);
                self.cached_score = Some(score);
                score
            }
        }
    }

    fn calculate_score_uncached(&mut self) -> S::Score {
        self.calculation_count += 1;
        (self.full_calculator)(&self.solution)
    }

    fn descriptor(&self) -> &SolutionDescriptor<S> {
        &self.descriptor
    }

    fn clone_working_solution(&self) -> S {
        self.solution.clone()
    }

    fn before_variable_changed(&mut self, entity_index: usize, variable_name: &str) {
        self.calculator
            .before_variable_changed(&self.solution, entity_index, variable_name);
    }

    fn after_variable_changed(&mut self, entity_index: usize, variable_name: &str) {
        self.calculation_count += 1;
        let score = self
            .calculator
            .after_variable_changed(&self.solution, entity_index, variable_name);
        self.cached_score = Some(score);
    }

    fn trigger_variable_listeners(&mut self) {
        for listener in &self.listeners {
            (listener.update)(&mut self.solution);
        }
    }

    fn score_calculation_count(&self) -> u64 {
        self.calculation_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plancraft_core::domain::{EntityDescriptor, VariableDescriptor};
    use plancraft_core::score::SimpleScore;

    #[derive(Clone)]
    struct Sol {
        values: Vec<Option<i64>>,
        score: Option<SimpleScore>,
    }

    impl PlanningSolution for Sol {
        type Score = SimpleScore;
        fn score(&self) -> Option<Self::Score> {
            self.score
        }
        fn set_score(&mut self, score: Option<Self::Score>) {
            self.score = score;
        }
    }

    fn value_count(s: &Sol) -> usize {
        s.values.len()
    }

    fn full_score(s: &Sol) -> SimpleScore {
        SimpleScore::of(s.values.iter().flatten().sum())
    }

    // Tracks the sum incrementally: retract on before, insert on after.
    struct SumCalculator {
        sum: i64,
    }

    impl IncrementalScoreCalculator<Sol> for SumCalculator {
        fn reset(&mut self, solution: &Sol) -> SimpleScore {
            self.sum = solution.values.iter().flatten().sum();
            SimpleScore::of(self.sum)
        }

        fn before_variable_changed(&mut self, solution: &Sol, entity_index: usize, _: &str) {
            self.sum -= solution.values[entity_index].unwrap_or(0);
        }

        fn after_variable_changed(
            &mut self,
            solution: &Sol,
            entity_index: usize,
            _: &str,
        ) -> SimpleScore {
            self.sum += solution.values[entity_index].unwrap_or(0);
            SimpleScore::of(self.sum)
        }
    }

    fn descriptor() -> SolutionDescriptor<Sol> {
        SolutionDescriptor::<Sol>::builder("Sol")
            .entity(
                EntityDescriptor::new("Value", value_count).with_variable(
                    VariableDescriptor::genuine("value").with_value_range("range"),
                ),
            )
            .build()
            .unwrap()
    }

    fn director() -> IncrementalScoreDirector<Sol, SumCalculator, fn(&Sol) -> SimpleScore> {
        let solution = Sol {
            values: vec![Some(1), Some(2), None],
            score: None,
        };
        IncrementalScoreDirector::new(
            solution,
            descriptor(),
            SumCalculator { sum: 0 },
            full_score,
        )
    }

    #[test]
    fn incremental_score_tracks_changes() {
        let mut d = director();
        assert_eq!(d.calculate_score(), SimpleScore::of(3));

        d.before_variable_changed(2, "value");
        d.working_solution_mut().values[2] = Some(10);
        d.after_variable_changed(2, "value");

        assert_eq!(d.calculate_score(), SimpleScore::of(13));
        assert_eq!(d.calculate_score_uncached(), SimpleScore::of(13));
    }

    #[test]
    fn cached_score_avoids_recalculation() {
        let mut d = director();
        let _ = d.calculate_score();
        let count = d.score_calculation_count();
        let _ = d.calculate_score();
        assert_eq!(d.score_calculation_count(), count);
    }

    #[test]
    fn assert_working_score_accepts_matching_score() {
        let mut d = director();
        let score = d.calculate_score();
        d.assert_working_score(score);
    }

    #[test]
    #[should_panic(expected = "Score corruption")]
    fn assert_working_score_panics_on_mismatch() {
        let mut d = director();
        let _ = d.calculate_score();
        // Mutate behind the calculator's back: the incremental state is
        // now stale, which assert mode must catch.
        d.working_solution_mut().values[0] = Some(100);
        d.assert_working_score(SimpleScore::of(3));
    }

    #[test]
    fn entity_count_reads_descriptor() {
        let d = director();
        assert_eq!(d.entity_count(0), 3);
        assert_eq!(d.entity_count(9), 0);
    }
}
