//! Initializing score trends.
//!
//! While a solution still has uninitialized planning variables, each score
//! level moves in a (sometimes known) direction as the remaining variables
//! get assigned. The trend captures that direction per level and feeds
//! optimistic/pessimistic bound construction.

use super::traits::Score;

/// The direction one score level can still move while the solution
/// initializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendLevel {
    /// Assigning more variables can only increase this level.
    OnlyUp,
    /// Assigning more variables can only decrease this level.
    OnlyDown,
    /// No monotonicity is known for this level.
    Unknown,
}

/// Per-level initializing trend for a score type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializingScoreTrend {
    levels: Vec<TrendLevel>,
}

impl InitializingScoreTrend {
    /// Creates a trend from explicit per-level directions.
    ///
    /// The slice length must match the score type's level count; this is
    /// checked by [`crate::score::ScoreBounder::new`].
    pub fn new(levels: Vec<TrendLevel>) -> Self {
        Self { levels }
    }

    /// Creates a trend with every level set to the same direction.
    pub fn uniform<Sc: Score>(level: TrendLevel) -> Self {
        Self {
            levels: vec![level; Sc::levels_count()],
        }
    }

    /// Returns the per-level directions, most significant level first.
    pub fn levels(&self) -> &[TrendLevel] {
        &self.levels
    }

    /// Returns true if every level is `OnlyDown`.
    pub fn is_only_down(&self) -> bool {
        self.levels.iter().all(|l| *l == TrendLevel::OnlyDown)
    }

    /// Returns true if every level is `OnlyUp`.
    pub fn is_only_up(&self) -> bool {
        self.levels.iter().all(|l| *l == TrendLevel::OnlyUp)
    }
}
