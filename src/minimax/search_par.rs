use rayon::prelude::*;

use crate::engine::{Board, Move};

use super::heuristic::evaluate;
use super::search_seq::minimize;
use super::{BranchEval, SearchConfig, SearchStats};

/// Minimax with the four root branches evaluated in parallel.
///
/// Each branch runs the sequential alpha-beta minimizer over its own copy of
/// the board with a full `(-inf, +inf)` window, so sibling branches share
/// nothing mutable and the reduction is a plain max: the chosen move and
/// score are identical to [`super::Minimax`].
pub struct MinimaxParallel {
    cfg: SearchConfig,
    stats: SearchStats,
}

impl MinimaxParallel {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(cfg: SearchConfig) -> Self {
        Self {
            cfg,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Score every root direction concurrently.
    ///
    /// Returns a fixed array in `[Up, Down, Left, Right]` order; directions
    /// that would not move anything are marked `legal = false`. With
    /// `max_depth` 0 each legal branch falls back to scoring its shifted
    /// board directly.
    pub fn branch_evals(&mut self, board: Board) -> [BranchEval; 4] {
        let cfg = &self.cfg;
        let depth = cfg.max_depth;
        let evals: Vec<(BranchEval, u64)> = Move::ALL
            .par_iter()
            .map(|&dir| {
                let shifted = board.shift(dir);
                if shifted == board {
                    let eval = BranchEval {
                        dir,
                        score: f64::NEG_INFINITY,
                        legal: false,
                    };
                    return (eval, 0);
                }
                let mut nodes = 0;
                let score = if depth == 0 {
                    evaluate(&shifted, cfg.weights)
                } else {
                    minimize(
                        cfg,
                        shifted,
                        depth - 1,
                        Some(dir),
                        f64::NEG_INFINITY,
                        f64::INFINITY,
                        &mut nodes,
                    )
                    .score
                };
                (
                    BranchEval {
                        dir,
                        score,
                        legal: true,
                    },
                    nodes,
                )
            })
            .collect();
        let mut out = [BranchEval {
            dir: Move::Up,
            score: f64::NEG_INFINITY,
            legal: false,
        }; 4];
        let mut nodes = 0;
        for (i, (eval, branch_nodes)) in evals.into_iter().enumerate() {
            out[i] = eval;
            nodes += branch_nodes;
        }
        self.stats.nodes = nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(nodes);
        out
    }

    /// Root search over the parallel branch evaluations.
    ///
    /// Ties break toward the earlier direction in `Move::ALL`, matching the
    /// sequential search.
    pub fn search(&mut self, board: Board) -> (f64, Option<Move>) {
        if self.cfg.max_depth == 0 || board.is_lost() {
            return (evaluate(&board, self.cfg.weights), None);
        }
        let branches = self.branch_evals(board);
        let mut best: Option<(f64, Move)> = None;
        for branch in branches {
            if !branch.legal {
                continue;
            }
            let improves = match best {
                Some((score, _)) => branch.score > score,
                None => true,
            };
            if improves {
                best = Some((branch.score, branch.dir));
            }
        }
        match best {
            Some((score, dir)) => (score, Some(dir)),
            None => (evaluate(&board, self.cfg.weights), None),
        }
    }

    #[inline]
    pub fn best_move(&mut self, board: Board) -> Option<Move> {
        self.search(board).1
    }

    /// Stats from the most recent invocation (nodes summed over branches).
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }
}

impl Default for MinimaxParallel {
    fn default() -> Self {
        Self::new()
    }
}
