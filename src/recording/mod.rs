//! Trajectory recording for training data collection.
//!
//! One [`Collector`] instance accumulates `(board, move)` pairs for every
//! decision of a game and an outcome label per game, and persists
//! completed batches as CSV files.
//!
//! # Components
//!
//! - `trajectory`: data structures for recorded games
//! - `collector`: the recording service driven by the episode loop
//! - `csv_writer`: CSV output and loading for training batches

pub mod collector;
pub mod csv_writer;
pub mod trajectory;

pub use collector::Collector;
pub use csv_writer::{load_samples_from_csv, write_trajectories, LoadedSample};
pub use trajectory::{MoveSample, Trajectory, LOSS_LABEL, WIN_LABEL};
