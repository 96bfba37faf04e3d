//! Level-weighted time-gradient interpolation.
//!
//! The time gradient expresses how far a score has progressed from a start
//! bound towards an end bound, as a value in `[0, 1]`. It is consumed by
//! annealing-style acceptors and termination progress estimates.

use super::traits::Score;

/// Calculates the time gradient of `current` between `start` and `end`.
///
/// `level_weights` assigns one weight per score level, most significant
/// level first; weights should sum to 1.0. Interpolation rules:
///
/// - `current >= end` yields 1.0 and `current <= start` yields 0.0
///   (clamping outside the `[start, end]` window).
/// - A level that has reached its end bound saturates: it contributes its
///   full weight and hands interpolation over to the next level.
/// - The first level still strictly between its bounds contributes
///   `weight * (current - start) / (end - start)`; levels below it
///   contribute nothing.
/// - Level widths clamp their denominator to a minimum of 1, so a
///   degenerate `start == end` level never divides by zero.
///
/// # Panics
/// Panics if `level_weights.len()` differs from the score's level count.
pub fn level_weighted_time_gradient<Sc: Score>(
    start: &Sc,
    end: &Sc,
    current: &Sc,
    level_weights: &[f64],
) -> f64 {
    assert_eq!(
        level_weights.len(),
        Sc::levels_count(),
        "expected one weight per score level"
    );

    if current >= end {
        return 1.0;
    }
    if current <= start {
        return 0.0;
    }

    let start_levels = start.to_level_numbers();
    let end_levels = end.to_level_numbers();
    let current_levels = current.to_level_numbers();

    let mut gradient = 0.0;
    for (index, &weight) in level_weights.iter().enumerate() {
        let start_level = start_levels[index];
        let end_level = end_levels[index];
        let current_level = current_levels[index];

        if current_level >= end_level {
            // Saturated: the full weight is earned, the next level decides.
            gradient += weight;
            continue;
        }
        if current_level > start_level {
            let width = (end_level - start_level).max(1) as f64;
            let progress = (current_level - start_level) as f64;
            gradient += weight * (progress / width);
        }
        break;
    }

    gradient.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{HardSoftScore, SimpleScore};

    #[test]
    fn clamps_outside_window() {
        let start = SimpleScore::of(0);
        let end = SimpleScore::of(10);
        assert_eq!(
            level_weighted_time_gradient(&start, &end, &SimpleScore::of(-5), &[1.0]),
            0.0
        );
        assert_eq!(
            level_weighted_time_gradient(&start, &end, &SimpleScore::of(42), &[1.0]),
            1.0
        );
    }

    #[test]
    fn interpolates_single_level() {
        let start = SimpleScore::of(0);
        let end = SimpleScore::of(10);
        let gradient = level_weighted_time_gradient(&start, &end, &SimpleScore::of(4), &[1.0]);
        assert!((gradient - 0.4).abs() < 1e-9);
    }

    #[test]
    fn dominant_level_saturates_before_secondary_contributes() {
        let start = HardSoftScore::of(-10, -100);
        let end = HardSoftScore::of(0, 0);

        // Hard level reached its end bound: hard weight fully earned,
        // soft level interpolates over the remainder.
        let current = HardSoftScore::of(0, -50);
        let gradient = HardSoftScore::time_gradient(start, end, current);
        assert!((gradient - (0.75 + 0.25 * 0.5)).abs() < 1e-9);

        // Hard level still in between: soft contributes nothing.
        let current = HardSoftScore::of(-5, 0);
        let gradient = HardSoftScore::time_gradient(start, end, current);
        assert!((gradient - 0.75 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_window_does_not_divide_by_zero() {
        let start = HardSoftScore::of(0, 0);
        let end = HardSoftScore::of(0, 0);
        let gradient =
            HardSoftScore::time_gradient(start, end, HardSoftScore::of(0, 0));
        assert_eq!(gradient, 1.0);
    }
}
