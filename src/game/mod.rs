pub mod direction;
pub mod game_state;
pub mod grid;

pub use direction::Direction;
pub use game_state::{GameState, Transition};
pub use grid::{Grid, GRID_SIZE, WINNING_TILE};
