//! Tunable knobs for the search driver.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::mcts::selection::EXPLORATION_WEIGHT;

/// Budget and scoring parameters for one move selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Wall-clock budget for the selection loop. A rollout in flight always
    /// runs to completion before the clock is checked again, so this is a
    /// soft lower bound rather than a hard deadline.
    pub duration: Duration,

    /// Exploration weight in the UCT formula.
    pub exploration_weight: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            exploration_weight: EXPLORATION_WEIGHT,
        }
    }
}

impl SearchOptions {
    /// Default options with a custom wall-clock budget.
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }
}
