//! Acceptors: pluggable local search acceptance policies.

use std::fmt::Debug;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use plancraft_core::domain::PlanningSolution;
use plancraft_core::score::Score;

/// Decides whether a candidate move's score is acceptable for this step.
///
/// Acceptors sit behind the same Move/Score contracts as the rest of the
/// engine; the phase feeds them its termination's time gradient so
/// annealing-style policies can cool over the phase's lifetime.
pub trait Acceptor<S: PlanningSolution>: Send + Debug {
    /// Returns true if a move with `move_score` may compete for this step,
    /// given the last committed step score.
    fn is_accepted(
        &mut self,
        rng: &mut ChaCha8Rng,
        last_step_score: &S::Score,
        move_score: &S::Score,
    ) -> bool;

    /// Called when the owning phase starts.
    fn phase_started(&mut self, _initial_score: &S::Score) {}

    /// Called when a step starts, with the phase's time gradient in
    /// `[0, 1]` (0.0 when the termination cannot estimate progress).
    fn step_started(&mut self, _time_gradient: f64) {}

    /// Called after a step commits, with the committed score.
    fn step_ended(&mut self, _step_score: &S::Score) {}

    /// Called when the owning phase ends.
    fn phase_ended(&mut self) {}
}

/// Accepts only non-worsening moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    /// Creates a new hill climbing acceptor.
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution> Acceptor<S> for HillClimbingAcceptor {
    fn is_accepted(
        &mut self,
        _rng: &mut ChaCha8Rng,
        last_step_score: &S::Score,
        move_score: &S::Score,
    ) -> bool {
        move_score >= last_step_score
    }
}

/// Simulated annealing: worsening moves are accepted with probability
/// `exp(delta / temperature)`, where `delta` is the (negative) scalarized
/// score difference and the temperature cools with the phase's time
/// gradient.
///
/// Improving moves are always accepted. At gradient 1.0 the temperature
/// reaches zero and the acceptor degenerates to hill climbing.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
}

impl SimulatedAnnealingAcceptor {
    /// Creates an acceptor with the given starting temperature (> 0).
    pub fn new(starting_temperature: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
        }
    }

    /// Returns the current temperature.
    pub fn current_temperature(&self) -> f64 {
        self.current_temperature
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<S: PlanningSolution> Acceptor<S> for SimulatedAnnealingAcceptor {
    fn is_accepted(
        &mut self,
        rng: &mut ChaCha8Rng,
        last_step_score: &S::Score,
        move_score: &S::Score,
    ) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        if self.current_temperature <= 0.0 {
            return false;
        }
        // delta < 0 for a worsening move.
        let delta = move_score.to_scalar() - last_step_score.to_scalar();
        let probability = (delta / self.current_temperature).exp();
        rng.random::<f64>() < probability
    }

    fn phase_started(&mut self, _initial_score: &S::Score) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_started(&mut self, time_gradient: f64) {
        let gradient = time_gradient.clamp(0.0, 1.0);
        self.current_temperature = self.starting_temperature * (1.0 - gradient);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::NQueensSolution;
    use plancraft_core::score::SimpleScore;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    #[test]
    fn hill_climbing_accepts_equal_and_better() {
        let mut acceptor = HillClimbingAcceptor::new();
        let mut rng = rng();
        let last = SimpleScore::of(-10);

        assert!(Acceptor::<NQueensSolution>::is_accepted(
            &mut acceptor,
            &mut rng,
            &last,
            &SimpleScore::of(-9)
        ));
        assert!(Acceptor::<NQueensSolution>::is_accepted(
            &mut acceptor,
            &mut rng,
            &last,
            &SimpleScore::of(-10)
        ));
        assert!(!Acceptor::<NQueensSolution>::is_accepted(
            &mut acceptor,
            &mut rng,
            &last,
            &SimpleScore::of(-11)
        ));
    }

    #[test]
    fn annealing_always_accepts_improving_moves() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(1.0);
        Acceptor::<NQueensSolution>::step_started(&mut acceptor, 1.0);
        assert_eq!(acceptor.current_temperature(), 0.0);

        let mut rng = rng();
        assert!(Acceptor::<NQueensSolution>::is_accepted(
            &mut acceptor,
            &mut rng,
            &SimpleScore::of(-10),
            &SimpleScore::of(-9)
        ));
        // Fully cooled: worsening moves are rejected outright.
        assert!(!Acceptor::<NQueensSolution>::is_accepted(
            &mut acceptor,
            &mut rng,
            &SimpleScore::of(-10),
            &SimpleScore::of(-11)
        ));
    }

    #[test]
    fn annealing_cools_with_the_time_gradient() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(2.0);
        Acceptor::<NQueensSolution>::phase_started(&mut acceptor, &SimpleScore::of(0));
        assert_eq!(acceptor.current_temperature(), 2.0);

        Acceptor::<NQueensSolution>::step_started(&mut acceptor, 0.5);
        assert!((acceptor.current_temperature() - 1.0).abs() < 1e-9);

        Acceptor::<NQueensSolution>::step_started(&mut acceptor, 0.75);
        assert!((acceptor.current_temperature() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn hot_annealing_accepts_most_small_regressions() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(1000.0);
        Acceptor::<NQueensSolution>::step_started(&mut acceptor, 0.0);

        let mut rng = rng();
        let accepted = (0..100)
            .filter(|_| {
                Acceptor::<NQueensSolution>::is_accepted(
                    &mut acceptor,
                    &mut rng,
                    &SimpleScore::of(0),
                    &SimpleScore::of(-1),
                )
            })
            .count();
        // exp(-1/1000) ~ 0.999: nearly everything passes.
        assert!(accepted > 90, "accepted only {}", accepted);
    }
}
