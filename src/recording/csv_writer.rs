//! CSV persistence for trajectory batches.
//!
//! Format: one row per decision —
//! `game,turn,cell_0..cell_15,direction,outcome`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::game::grid::GRID_SIZE;
use crate::recording::trajectory::{MoveSample, Trajectory};
use crate::{Result, Twenty48Error};

const BOARD_CELLS: usize = GRID_SIZE * GRID_SIZE;

fn write_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
    let mut header = String::from("game,turn");
    for i in 0..BOARD_CELLS {
        header.push_str(&format!(",cell_{}", i));
    }
    header.push_str(",direction,outcome");
    writeln!(writer, "{}", header)
}

fn write_sample<W: Write>(
    writer: &mut W,
    game: usize,
    turn: usize,
    sample: &MoveSample,
    outcome: i8,
) -> std::io::Result<()> {
    let mut row = format!("{},{}", game, turn);
    for cell in &sample.board {
        row.push_str(&format!(",{}", cell));
    }
    row.push_str(&format!(",{},{}", sample.direction, outcome));
    writeln!(writer, "{}", row)
}

/// Writes a complete batch, header first. The file is replaced.
pub fn write_trajectories<P: AsRef<Path>>(path: P, trajectories: &[Trajectory]) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_header(&mut writer)?;

    for (game, trajectory) in trajectories.iter().enumerate() {
        let outcome = trajectory.outcome.unwrap_or(0);
        for (turn, sample) in trajectory.samples.iter().enumerate() {
            write_sample(&mut writer, game, turn, sample, outcome)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// A decision loaded back from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSample {
    pub game: usize,
    pub turn: usize,
    pub board: Vec<u32>,
    pub direction: u8,
    pub outcome: i8,
}

/// Loads every decision row from a batch written by
/// [`write_trajectories`].
pub fn load_samples_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<LoadedSample>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| Twenty48Error::Recording(e.to_string()))?;
    let mut samples = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| Twenty48Error::Recording(e.to_string()))?;

        let game: usize = record.get(0).unwrap_or("0").parse().unwrap_or(0);
        let turn: usize = record.get(1).unwrap_or("0").parse().unwrap_or(0);

        let mut board = Vec::with_capacity(BOARD_CELLS);
        for i in 2..2 + BOARD_CELLS {
            let value: u32 = record.get(i).unwrap_or("0").parse().unwrap_or(0);
            board.push(value);
        }

        let direction: u8 = record
            .get(2 + BOARD_CELLS)
            .unwrap_or("0")
            .parse()
            .unwrap_or(0);
        let outcome: i8 = record
            .get(3 + BOARD_CELLS)
            .unwrap_or("0")
            .parse()
            .unwrap_or(0);

        samples.push(LoadedSample {
            game,
            turn,
            board,
            direction,
            outcome,
        });
    }

    Ok(samples)
}
