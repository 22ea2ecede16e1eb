//! Batch experiment support: drive many independent games to completion and
//! record how long each took to lose.

use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::engine::GameState;
use crate::policy::Policy;

/// Outcome of one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub moves_made: u32,
    pub highest_tile: u32,
}

/// Errors surfaced by the experiment writers.
#[derive(thiserror::Error, Debug)]
pub enum ExperimentError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Play one game to completion: ask the policy for a move, apply it with a
/// spawn, stop when the board is lost or the policy has no move to offer.
pub fn play_game<P, R>(policy: &mut P, rng: &mut R) -> GameRecord
where
    P: Policy,
    R: Rng + ?Sized,
{
    let mut state = GameState::new(rng);
    while !state.is_lost() {
        match policy.choose(&state) {
            Some(dir) => state = state.apply_move_and_spawn(dir, rng),
            None => break,
        }
    }
    GameRecord {
        moves_made: state.moves_made(),
        highest_tile: state.board().highest_tile(),
    }
}

/// Run `games` independent games in parallel.
///
/// Game `i` gets its own policy and RNG derived from `base_seed + i`, so a
/// batch is reproducible regardless of how rayon schedules it.
pub fn run_batch<P, F>(games: usize, base_seed: u64, make_policy: F) -> Vec<GameRecord>
where
    P: Policy,
    F: Fn(u64) -> P + Sync,
{
    (0..games as u64)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i);
            let mut policy = make_policy(seed);
            let mut rng = StdRng::seed_from_u64(seed);
            play_game(&mut policy, &mut rng)
        })
        .collect()
}

/// Aggregate view of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub mean_moves: f64,
    pub min_moves: u32,
    pub max_moves: u32,
    pub highest_tile: u32,
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        if records.is_empty() {
            return Summary {
                games: 0,
                mean_moves: 0.0,
                min_moves: 0,
                max_moves: 0,
                highest_tile: 0,
            };
        }
        let total: u64 = records.iter().map(|r| u64::from(r.moves_made)).sum();
        Summary {
            games: records.len(),
            mean_moves: total as f64 / records.len() as f64,
            min_moves: records.iter().map(|r| r.moves_made).min().unwrap_or(0),
            max_moves: records.iter().map(|r| r.moves_made).max().unwrap_or(0),
            highest_tile: records.iter().map(|r| r.highest_tile).max().unwrap_or(0),
        }
    }
}

/// Write one move count per line, in batch order.
pub fn write_move_counts<P: AsRef<Path>>(
    path: P,
    records: &[GameRecord],
) -> Result<(), ExperimentError> {
    let mut file = fs::File::create(path)?;
    for record in records {
        writeln!(file, "{}", record.moves_made)?;
    }
    Ok(())
}

/// Write the JSON summary of a batch.
pub fn write_summary<P: AsRef<Path>>(path: P, summary: &Summary) -> Result<(), ExperimentError> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RandomPolicy;

    #[test]
    fn play_game_reaches_a_terminal_state() {
        let mut policy = RandomPolicy::from_seed(17);
        let mut rng = StdRng::seed_from_u64(17);
        let record = play_game(&mut policy, &mut rng);
        assert!(record.moves_made > 0);
        assert!(record.highest_tile >= 4);
    }

    #[test]
    fn batches_are_reproducible() {
        let a = run_batch(4, 99, RandomPolicy::from_seed);
        let b = run_batch(4, 99, RandomPolicy::from_seed);
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn summary_aggregates_records() {
        let records = [
            GameRecord {
                moves_made: 10,
                highest_tile: 16,
            },
            GameRecord {
                moves_made: 20,
                highest_tile: 64,
            },
        ];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.games, 2);
        assert_eq!(summary.mean_moves, 15.0);
        assert_eq!(summary.min_moves, 10);
        assert_eq!(summary.max_moves, 20);
        assert_eq!(summary.highest_tile, 64);

        let empty = Summary::from_records(&[]);
        assert_eq!(empty.games, 0);
        assert_eq!(empty.mean_moves, 0.0);
    }

    #[test]
    fn move_counts_file_has_one_line_per_game() {
        let records = run_batch(3, 7, RandomPolicy::from_seed);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moves.csv");
        write_move_counts(&path, &records).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        for (line, record) in lines.iter().zip(&records) {
            assert_eq!(line.parse::<u32>().unwrap(), record.moves_made);
        }
    }

    #[test]
    fn summary_round_trips_through_json() {
        let records = [GameRecord {
            moves_made: 42,
            highest_tile: 128,
        }];
        let summary = Summary::from_records(&records);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary(&path, &summary).unwrap();
        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"games\": 1"));
        assert!(json.contains("\"max_moves\": 42"));
    }
}
