//! Foragers for construction heuristic move selection.
//!
//! A forager records every evaluated candidate as an (ordinal index,
//! score) pair and, once the decider finishes the placement, picks
//! exactly one as the step's winner.

use std::fmt::Debug;
use std::marker::PhantomData;

use plancraft_core::domain::PlanningSolution;
use plancraft_core::score::Score;

/// Records evaluated candidates and selects the step winner.
///
/// # Type Parameters
/// * `S` - The planning solution type
pub trait ConstructionForager<S: PlanningSolution>: Send + Debug {
    /// Clears recorded candidates; called at the start of every step.
    fn step_started(&mut self);

    /// Records one evaluated candidate: its ordinal index within the
    /// placement and the score its application produced.
    fn add_move(&mut self, index: usize, score: S::Score);

    /// Returns true if the decider should stop evaluating further
    /// candidates this step.
    fn is_quit_early(&self) -> bool {
        false
    }

    /// Picks the winner among the recorded candidates, or `None` when
    /// nothing was recorded.
    fn pick_winner(&self) -> Option<(usize, S::Score)>;
}

/// Default forager: highest score wins, first-seen wins ties.
///
/// Stable and deterministic: given candidate scores `[3, 5, 5, 2]` in
/// evaluation order, index 1 wins.
pub struct BestScoreForager<S: PlanningSolution> {
    best: Option<(usize, S::Score)>,
    _phantom: PhantomData<fn() -> S>,
}

impl<S: PlanningSolution> BestScoreForager<S> {
    /// Creates a new best-score forager.
    pub fn new() -> Self {
        Self {
            best: None,
            _phantom: PhantomData,
        }
    }
}

impl<S: PlanningSolution> Default for BestScoreForager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for BestScoreForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestScoreForager")
            .field("best", &self.best.as_ref().map(|(i, _)| *i))
            .finish()
    }
}

impl<S: PlanningSolution> ConstructionForager<S> for BestScoreForager<S> {
    fn step_started(&mut self) {
        self.best = None;
    }

    fn add_move(&mut self, index: usize, score: S::Score) {
        let improves = match &self.best {
            None => true,
            // Strict: an equal score keeps the earlier candidate.
            Some((_, best_score)) => score.is_better_than(best_score),
        };
        if improves {
            self.best = Some((index, score));
        }
    }

    fn pick_winner(&self) -> Option<(usize, S::Score)> {
        self.best
    }
}

/// First-fit forager: takes the first evaluated candidate and quits early.
///
/// Fastest construction variant; candidate order decides everything.
pub struct FirstFitForager<S: PlanningSolution> {
    first: Option<(usize, S::Score)>,
    _phantom: PhantomData<fn() -> S>,
}

impl<S: PlanningSolution> FirstFitForager<S> {
    /// Creates a new first-fit forager.
    pub fn new() -> Self {
        Self {
            first: None,
            _phantom: PhantomData,
        }
    }
}

impl<S: PlanningSolution> Default for FirstFitForager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for FirstFitForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstFitForager").finish()
    }
}

impl<S: PlanningSolution> ConstructionForager<S> for FirstFitForager<S> {
    fn step_started(&mut self) {
        self.first = None;
    }

    fn add_move(&mut self, index: usize, score: S::Score) {
        if self.first.is_none() {
            self.first = Some((index, score));
        }
    }

    fn is_quit_early(&self) -> bool {
        self.first.is_some()
    }

    fn pick_winner(&self) -> Option<(usize, S::Score)> {
        self.first
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::NQueensSolution;
    use plancraft_core::score::SimpleScore;

    #[test]
    fn best_score_first_seen_wins_ties() {
        let mut forager = BestScoreForager::<NQueensSolution>::new();
        forager.step_started();
        for (index, value) in [3i64, 5, 5, 2].into_iter().enumerate() {
            forager.add_move(index, SimpleScore::of(value));
        }
        assert_eq!(forager.pick_winner(), Some((1, SimpleScore::of(5))));
    }

    #[test]
    fn empty_step_picks_nothing() {
        let forager = BestScoreForager::<NQueensSolution>::new();
        assert_eq!(forager.pick_winner(), None);
    }

    #[test]
    fn step_started_clears_previous_step() {
        let mut forager = BestScoreForager::<NQueensSolution>::new();
        forager.step_started();
        forager.add_move(0, SimpleScore::of(9));
        forager.step_started();
        assert_eq!(forager.pick_winner(), None);
    }

    #[test]
    fn first_fit_quits_after_the_first_candidate() {
        let mut forager = FirstFitForager::<NQueensSolution>::new();
        forager.step_started();
        assert!(!forager.is_quit_early());
        forager.add_move(0, SimpleScore::of(1));
        assert!(forager.is_quit_early());
        forager.add_move(1, SimpleScore::of(100));
        assert_eq!(forager.pick_winner(), Some((0, SimpleScore::of(1))));
    }
}
