//! Collector service accumulating game trajectories across move decisions.

use std::path::Path;

use crate::game::direction::Direction;
use crate::recording::csv_writer;
use crate::recording::trajectory::Trajectory;
use crate::Result;

/// Accumulates `(board, move)` pairs per game and completed games per
/// batch. One collector spans many move selections; the episode loop
/// replaces it with a fresh instance once the batch is large enough.
#[derive(Debug, Default)]
pub struct Collector {
    completed: Vec<Trajectory>,
    current: Option<Trajectory>,
}

impl Collector {
    pub fn new() -> Collector {
        Collector::default()
    }

    /// Opens a fresh trajectory. An unfinished one is discarded.
    pub fn begin_record(&mut self) {
        if self.current.is_some() {
            log::warn!("begin_record with an unfinished trajectory, discarding it");
        }
        self.current = Some(Trajectory::new());
        log::info!("started recording game #{}", self.completed.len());
    }

    /// Appends one decision to the in-progress trajectory.
    pub fn add(&mut self, board: Vec<u32>, direction: Direction) {
        match self.current.as_mut() {
            Some(trajectory) => trajectory.add(board, direction),
            None => log::warn!("add called with no trajectory in progress"),
        }
    }

    /// Stamps the outcome label and moves the trajectory to the batch.
    pub fn stop_record(&mut self, outcome: i8) {
        match self.current.take() {
            Some(mut trajectory) => {
                trajectory.finalize(outcome);
                self.completed.push(trajectory);
            }
            None => log::warn!("stop_record called with no trajectory in progress"),
        }
    }

    /// Number of completed trajectories in the batch.
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn trajectories(&self) -> &[Trajectory] {
        &self.completed
    }

    /// Writes the whole batch to `path`, replacing any previous content.
    pub fn serialize<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        csv_writer::write_trajectories(path, &self.completed)
    }
}
