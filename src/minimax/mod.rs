//! Minimax move search that plays 2048 to lose.
//!
//! The maximizer is the move-choosing agent; because the evaluation rewards
//! positions close to losing, it *maximizes*. The minimizer models the random
//! tile-spawn environment adversarially: it places a 2 and a 4 in every empty
//! cell and keeps the outcome that prolongs the game most. Alpha-beta pruning
//! skips provably inferior branches without changing the chosen move.
//!
//! Two implementations share one recursion:
//! - [`Minimax`]: single-threaded search.
//! - [`MinimaxParallel`]: rayon-parallel evaluation of the four root branches.
//!
//! Quick start
//! ```
//! use anti_2048::engine::GameState;
//! use anti_2048::minimax::{Minimax, MinimaxParallel, SearchConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let state = GameState::new(&mut rng);
//!
//! let mut search = Minimax::with_config(SearchConfig { max_depth: 3, ..Default::default() });
//! let m = search.best_move(*state.board());
//!
//! let mut par = MinimaxParallel::with_config(SearchConfig { max_depth: 3, ..Default::default() });
//! assert!(m.is_some() && par.best_move(*state.board()).is_some());
//! ```

mod heuristic;
mod search_par;
mod search_seq;

pub use heuristic::{adjacent_equal_count, evaluate};
pub use search_par::MinimaxParallel;
pub use search_seq::Minimax;

use crate::engine::Move;

/// Weights of the loss-seeking evaluation.
///
/// `fill` scales the occupied-cell term; `adjacency` scales the penalty for
/// equal adjacent tiles (potential merges keep the game alive). Both are
/// expected to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalWeights {
    pub fill: f64,
    pub adjacency: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            fill: 16.0,
            adjacency: 1.0,
        }
    }
}

/// Configurable knobs for the search. Immutable per invocation.
///
/// - `max_depth`: ply bound; 0 means "evaluate the current state immediately".
/// - `weights`: evaluation weights.
/// - `pruning`: alpha-beta toggle. Disabling must not change the returned
///   move or score, only the number of nodes visited.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u32,
    pub weights: EvalWeights,
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            weights: EvalWeights::default(),
            pruning: true,
        }
    }
}

/// Score of one root direction.
#[derive(Debug, Clone, Copy)]
pub struct BranchEval {
    pub dir: Move,
    pub score: f64,
    pub legal: bool,
}

/// Basic search stats for a single invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub peak_nodes: u64,
}

/// Score plus the top-level move it belongs to. The move is fixed at the
/// first ply; deeper plies only carry it upward.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeResult {
    pub(crate) score: f64,
    pub(crate) dir: Option<Move>,
}
