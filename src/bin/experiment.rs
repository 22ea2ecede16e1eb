use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use anti_2048::experiment::{self, play_game, GameRecord, Summary};
use anti_2048::minimax::{EvalWeights, Minimax, MinimaxParallel, SearchConfig};
use anti_2048::policy::RandomPolicy;

#[derive(Debug, Parser)]
#[command(name = "experiment", about = "Drive batches of 2048 games played to lose")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Move chooser driving the games
    #[arg(long, value_enum, default_value_t = Chooser::Minimax)]
    policy: Chooser,

    /// Search depth for the minimax choosers
    #[arg(long, default_value_t = 5)]
    depth: u32,

    /// Weight on the occupied-cell term of the evaluation
    #[arg(long, default_value_t = 16.0)]
    fill_weight: f64,

    /// Weight on the adjacent-equal term of the evaluation
    #[arg(long, default_value_t = 1.0)]
    adjacency_weight: f64,

    /// Base RNG seed; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write one move count per line to this path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the JSON summary to this path
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Chooser {
    /// Uniform-random legal move
    Random,
    /// Sequential alpha-beta minimax
    Minimax,
    /// Minimax with parallel root branches
    Parallel,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = SearchConfig {
        max_depth: args.depth,
        weights: EvalWeights {
            fill: args.fill_weight,
            adjacency: args.adjacency_weight,
        },
        ..Default::default()
    };

    let pb = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise}")
                .context("invalid progress template")?,
        );
        Some(pb)
    };

    let start = Instant::now();
    let records: Vec<GameRecord> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let seed = args.seed.wrapping_add(i);
            let mut rng = StdRng::seed_from_u64(seed);
            let record = match args.policy {
                Chooser::Random => {
                    let mut policy = RandomPolicy::from_seed(seed);
                    play_game(&mut policy, &mut rng)
                }
                Chooser::Minimax => {
                    let mut policy = Minimax::with_config(cfg.clone());
                    play_game(&mut policy, &mut rng)
                }
                Chooser::Parallel => {
                    let mut policy = MinimaxParallel::with_config(cfg.clone());
                    play_game(&mut policy, &mut rng)
                }
            };
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            record
        })
        .collect();
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    let summary = Summary::from_records(&records);
    if let Some(path) = &args.out {
        experiment::write_move_counts(path, &records)
            .with_context(|| format!("writing move counts to {}", path.display()))?;
    }
    if let Some(path) = &args.summary_out {
        experiment::write_summary(path, &summary)
            .with_context(|| format!("writing summary to {}", path.display()))?;
    }
    if !args.quiet {
        eprintln!(
            "Played {} games in {:.2}s",
            summary.games,
            start.elapsed().as_secs_f64()
        );
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
