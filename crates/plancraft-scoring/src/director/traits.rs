// Score director trait definition.

use plancraft_core::domain::{PlanningSolution, SolutionDescriptor};

// The score director manages solution state and score calculation.
//
// It is responsible for:
// - Maintaining the working solution
// - Calculating scores (incrementally when possible)
// - Receiving variable change notifications for incremental updates
// - Running shadow variable listeners after committed moves
// - Providing access to solution metadata via descriptors
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    fn working_solution_mut(&mut self) -> &mut S;

    // Calculates and returns the current score.
    //
    // Incremental directors may serve this from a cached delta; use
    // `calculate_score_uncached` to force a from-scratch pass.
    fn calculate_score(&mut self) -> S::Score;

    // Recomputes the score from scratch, bypassing any incremental state.
    fn calculate_score_uncached(&mut self) -> S::Score;

    // Returns the solution descriptor for this solution type.
    fn descriptor(&self) -> &SolutionDescriptor<S>;

    // Clones the working solution.
    fn clone_working_solution(&self) -> S;

    // Called before a planning variable is changed.
    fn before_variable_changed(&mut self, entity_index: usize, variable_name: &str);

    // Called after a planning variable is changed.
    fn after_variable_changed(&mut self, entity_index: usize, variable_name: &str);

    // Runs shadow variable listeners, in registration order.
    //
    // Called after each committed move; never during the do/score/undo
    // candidate evaluation cycle.
    fn trigger_variable_listeners(&mut self);

    // Returns the number of entities for a given descriptor index.
    fn entity_count(&self, descriptor_index: usize) -> usize {
        self.descriptor()
            .entity_count(descriptor_index, self.working_solution())
    }

    // Returns how many score calculations this director has performed.
    fn score_calculation_count(&self) -> u64;

    // Verifies that the incremental working score matches a from-scratch
    // recomputation. Only called in assert-enabled environment modes.
    //
    // # Panics
    // Panics on mismatch: a diverged incremental score means the scoring
    // logic is corrupt and the engine cannot safely continue.
    fn assert_working_score(&mut self, expected: S::Score) {
        let fresh = self.calculate_score_uncached();
        if fresh != expected {
            panic!(
                "Score corruption: working score ({}) differs from a \
                 from-scratch recomputation ({})",
                expected, fresh
            );
        }
    }
}
