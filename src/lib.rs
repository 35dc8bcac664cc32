//! # twenty48
//!
//! A 2048 tile game implementation with a Monte Carlo Tree Search agent
//! and trajectory recording for training data collection.
//!
//! ## Features
//!
//! - **Game Engine**: board rules, directional moves and stochastic tile
//!   spawns
//! - **Search Engine**: Monte Carlo Tree Search with UCT selection,
//!   parallel root evaluation and a wall-clock search budget
//! - **Recording**: per-game trajectory collection and CSV batches for
//!   offline training
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use twenty48::{GameState, MonteCarloAgent, SearchOptions};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let state = GameState::new().random_spawn(&mut rng);
//!
//! let agent = MonteCarloAgent::new(SearchOptions::with_duration(Duration::from_millis(10)));
//! let best = agent.select_move(&state, &mut rng).unwrap();
//! println!("best move: {}", best);
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game rules: grid, directions and state transitions
pub mod game;

/// Monte Carlo Tree Search engine
pub mod mcts;

/// Trajectory recording for training data collection
pub mod recording;

/// Logging configuration for the collection binary
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::{Direction, GameState, Grid, Transition};
pub use mcts::{MonteCarloAgent, SearchOptions};
pub use recording::Collector;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the twenty48 library
#[derive(Debug, thiserror::Error)]
pub enum Twenty48Error {
    #[error("Game error: {0}")]
    Game(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Recording error: {0}")]
    Recording(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Twenty48Error>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
