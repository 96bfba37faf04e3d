//! Score bound construction for partially initialized solutions.

use crate::error::{PlancraftError, Result};

use super::trend::{InitializingScoreTrend, TrendLevel};
use super::traits::Score;

/// Builds optimistic and pessimistic score bounds from an initializing
/// trend.
///
/// Given the score of a partially initialized solution:
///
/// - The **optimistic bound** is never worse than any fully initialized
///   completion of that solution.
/// - The **pessimistic bound** is never better than any fully initialized
///   completion.
///
/// Levels that can still move in the favorable (resp. unfavorable)
/// direction are substituted with the extreme representable value
/// (`i64::MAX` / `i64::MIN`).
///
/// # Examples
///
/// ```
/// use plancraft_core::score::{
///     HardSoftScore, InitializingScoreTrend, ScoreBounder, TrendLevel,
/// };
///
/// let bounder = ScoreBounder::<HardSoftScore>::new(InitializingScoreTrend::new(vec![
///     TrendLevel::OnlyDown,
///     TrendLevel::Unknown,
/// ]))
/// .unwrap();
///
/// let score = HardSoftScore::of(-2, 5);
/// assert_eq!(bounder.optimistic_bound(score), HardSoftScore::of(-2, i64::MAX));
/// assert_eq!(
///     bounder.pessimistic_bound(score),
///     HardSoftScore::of(i64::MIN, i64::MIN)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ScoreBounder<Sc: Score> {
    trend: InitializingScoreTrend,
    _phantom: std::marker::PhantomData<fn() -> Sc>,
}

impl<Sc: Score> ScoreBounder<Sc> {
    /// Creates a bounder for the given trend.
    ///
    /// # Errors
    /// Returns a configuration error if the trend's level count does not
    /// match the score type's level count.
    pub fn new(trend: InitializingScoreTrend) -> Result<Self> {
        if trend.levels().len() != Sc::levels_count() {
            return Err(PlancraftError::Config(format!(
                "Initializing trend has {} levels but the score type has {}",
                trend.levels().len(),
                Sc::levels_count()
            )));
        }
        Ok(Self {
            trend,
            _phantom: std::marker::PhantomData,
        })
    }

    /// Returns the trend this bounder was built from.
    pub fn trend(&self) -> &InitializingScoreTrend {
        &self.trend
    }

    /// Returns a score that no fully initialized completion can beat.
    ///
    /// A level that can only go down is already at its best, so it is kept.
    /// A level that can go up (or whose direction is unknown) could still
    /// reach the maximum representable value.
    pub fn optimistic_bound(&self, score: Sc) -> Sc {
        let levels: Vec<i64> = score
            .to_level_numbers()
            .iter()
            .zip(self.trend.levels())
            .map(|(&value, trend)| match trend {
                TrendLevel::OnlyDown => value,
                TrendLevel::OnlyUp | TrendLevel::Unknown => i64::MAX,
            })
            .collect();
        Sc::from_level_numbers(&levels)
    }

    /// Returns a score that every fully initialized completion beats or
    /// matches.
    ///
    /// A level that can only go up is already at its worst, so it is kept.
    /// A level that can go down (or whose direction is unknown) could still
    /// fall to the minimum representable value.
    pub fn pessimistic_bound(&self, score: Sc) -> Sc {
        let levels: Vec<i64> = score
            .to_level_numbers()
            .iter()
            .zip(self.trend.levels())
            .map(|(&value, trend)| match trend {
                TrendLevel::OnlyUp => value,
                TrendLevel::OnlyDown | TrendLevel::Unknown => i64::MIN,
            })
            .collect();
        Sc::from_level_numbers(&levels)
    }
}
