//! Trajectory data structures for training data collection.

use serde::{Deserialize, Serialize};

use crate::game::direction::Direction;

/// Outcome label of a won game.
pub const WIN_LABEL: i8 = 1;

/// Outcome label of a lost game.
pub const LOSS_LABEL: i8 = -1;

/// One recorded decision: the board before the move and the move label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSample {
    /// Row-major board encoding taken before the move was applied.
    pub board: Vec<u32>,
    /// Numeric move label, see [`Direction::index`].
    pub direction: u8,
}

/// All decisions of one game plus the final outcome label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trajectory {
    pub samples: Vec<MoveSample>,
    /// [`WIN_LABEL`] or [`LOSS_LABEL`] once finalized, `None` while the
    /// game is still being recorded.
    pub outcome: Option<i8>,
    /// Unix timestamp taken when recording started.
    pub started_at: i64,
}

impl Trajectory {
    pub fn new() -> Trajectory {
        Trajectory {
            samples: Vec::new(),
            outcome: None,
            started_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn add(&mut self, board: Vec<u32>, direction: Direction) {
        self.samples.push(MoveSample {
            board,
            direction: direction.index(),
        });
    }

    pub fn finalize(&mut self, outcome: i8) {
        self.outcome = Some(outcome);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}
