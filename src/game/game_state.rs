use rand::Rng;
use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::game::direction::Direction;
use crate::game::grid::{Grid, WINNING_TILE};

/// Kind of transition that produced a state: a stochastic tile spawn
/// (initial states included) or a directional shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Spawn,
    Shift(Direction),
}

/// Immutable snapshot of the board plus the transition that produced it.
/// Every operation returns a new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub transition: Transition,
}

impl GameState {
    pub fn new() -> GameState {
        GameState {
            grid: Grid::empty(),
            transition: Transition::Spawn,
        }
    }

    /// Directions whose shift actually changes the board, in
    /// [`Direction::ALL`] order.
    pub fn valid_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&direction| self.grid.shift(direction) != self.grid)
            .collect()
    }

    pub fn can_play(&self) -> bool {
        !self.valid_moves().is_empty()
    }

    pub fn apply_move(&self, direction: Direction) -> GameState {
        GameState {
            grid: self.grid.shift(direction),
            transition: Transition::Shift(direction),
        }
    }

    /// Places a 2 (probability 0.9) or a 4 (0.1) on a uniformly random
    /// empty cell. A grid with no empty cell is returned unchanged.
    pub fn random_spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return self.clone();
        }

        let (row, col) = empty[rng.random_range(0..empty.len())];
        let value = if rng.random_range(0..10) == 0 { 4 } else { 2 };

        let mut grid = self.grid;
        grid.cells[row][col] = value;

        GameState {
            grid,
            transition: Transition::Spawn,
        }
    }

    /// True once a winning tile exists. Merges only grow tiles, so a win
    /// observed mid-game persists to the terminal state.
    pub fn is_win(&self) -> bool {
        self.grid.highest_tile() >= WINNING_TILE
    }

    /// True for initial and post-spawn states.
    pub fn is_post_spawn(&self) -> bool {
        self.transition == Transition::Spawn
    }

    pub fn board_encoding(&self) -> Vec<u32> {
        self.grid.encode()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_state_is_post_spawn_and_unplayable() {
        let state = GameState::new();
        assert!(state.is_post_spawn());
        // an empty grid has nothing to move
        assert!(!state.can_play());
    }

    #[test]
    fn test_random_spawn_places_exactly_one_tile() {
        let mut rng = StdRng::seed_from_u64(17);
        let state = GameState::new().random_spawn(&mut rng);

        let filled: Vec<u32> = state
            .board_encoding()
            .into_iter()
            .filter(|&value| value != 0)
            .collect();
        assert_eq!(filled.len(), 1);
        assert!(filled[0] == 2 || filled[0] == 4);
        assert!(state.is_post_spawn());
    }

    #[test]
    fn test_random_spawn_on_full_grid_is_identity() {
        let mut rng = StdRng::seed_from_u64(17);
        let grid = Grid {
            cells: [
                [2, 4, 2, 4],
                [4, 2, 4, 2],
                [2, 4, 2, 4],
                [4, 2, 4, 2],
            ],
        };
        let state = GameState {
            grid,
            transition: Transition::Spawn,
        };

        assert_eq!(state.random_spawn(&mut rng), state);
    }

    #[test]
    fn test_apply_move_tags_the_transition() {
        let mut grid = Grid::empty();
        grid.cells[0][0] = 2;
        grid.cells[0][1] = 2;
        let state = GameState {
            grid,
            transition: Transition::Spawn,
        };

        let moved = state.apply_move(Direction::Left);
        assert_eq!(moved.transition, Transition::Shift(Direction::Left));
        assert_eq!(moved.grid.cells[0], [4, 0, 0, 0]);
        assert!(!moved.is_post_spawn());
    }

    #[test]
    fn test_valid_moves_for_a_corner_tile() {
        let mut grid = Grid::empty();
        grid.cells[0][0] = 2;
        let state = GameState {
            grid,
            transition: Transition::Spawn,
        };

        // the tile is flush with the top-left corner: only Down and Right
        // change the board, in ALL enumeration order
        assert_eq!(state.valid_moves(), vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn test_blocked_board_cannot_play() {
        let grid = Grid {
            cells: [
                [2, 4, 2, 4],
                [4, 2, 4, 2],
                [2, 4, 2, 4],
                [4, 2, 4, 2],
            ],
        };
        let state = GameState {
            grid,
            transition: Transition::Spawn,
        };

        assert!(state.valid_moves().is_empty());
        assert!(!state.can_play());
    }

    #[test]
    fn test_is_win() {
        let mut grid = Grid::empty();
        grid.cells[2][2] = 1024;
        let state = GameState {
            grid,
            transition: Transition::Spawn,
        };
        assert!(!state.is_win());

        let mut grid = Grid::empty();
        grid.cells[2][2] = 2048;
        let state = GameState {
            grid,
            transition: Transition::Spawn,
        };
        assert!(state.is_win());
    }
}
