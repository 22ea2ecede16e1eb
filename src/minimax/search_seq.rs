use crate::engine::{Board, Move};

use super::heuristic::evaluate;
use super::{NodeResult, SearchConfig, SearchStats};

/// Single-threaded depth-bounded minimax with alpha-beta pruning.
///
/// Each invocation is a self-contained tree exploration; nothing persists
/// across calls except the configuration and accumulated stats. Branches
/// explore copies of the board, so sibling branches never observe each
/// other's work.
pub struct Minimax {
    cfg: SearchConfig,
    stats: SearchStats,
}

impl Minimax {
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

    /// Run the search from the root maximizer and return the score together
    /// with the top-level move it belongs to.
    ///
    /// The move is `None` when the board is already lost, when no direction
    /// is legal, or when `max_depth` is 0 (a valid base case that evaluates
    /// the current board immediately).
    pub fn search(&mut self, board: Board) -> (f64, Option<Move>) {
        let mut nodes = 0;
        let result = maximize(
            &self.cfg,
            board,
            self.cfg.max_depth,
            None,
            f64::NEG_INFINITY,
            f64::INFINITY,
            &mut nodes,
        );
        self.stats.nodes = nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(nodes);
        (result.score, result.dir)
    }

    /// The direction judged most likely to end the game soonest.
    ///
    /// ```
    /// use anti_2048::engine::GameState;
    /// use anti_2048::minimax::Minimax;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let state = GameState::new(&mut rng);
    /// let mut search = Minimax::new();
    /// assert!(search.best_move(*state.board()).is_some());
    /// ```
    #[inline]
    pub fn best_move(&mut self, board: Board) -> Option<Move> {
        self.search(board).1
    }

    /// Root score only.
    #[inline]
    pub fn state_value(&mut self, board: Board) -> f64 {
        self.search(board).0
    }

    /// Stats from the most recent invocation.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new()
    }
}

/// Move-choosing ply. Tries every legal direction (slide/merge only, no
/// spawn) and keeps the child with the highest score. The propagated move is
/// fixed at the first ply: deeper maximizers pass the top-level candidate
/// through unchanged.
pub(crate) fn maximize(
    cfg: &SearchConfig,
    board: Board,
    depth: u32,
    chosen: Option<Move>,
    mut alpha: f64,
    beta: f64,
    nodes: &mut u64,
) -> NodeResult {
    *nodes += 1;
    if depth == 0 || board.is_lost() {
        return NodeResult {
            score: evaluate(&board, cfg.weights),
            dir: chosen,
        };
    }
    let mut best = NodeResult {
        score: f64::NEG_INFINITY,
        dir: chosen,
    };
    for dir in Move::ALL {
        let shifted = board.shift(dir);
        if shifted == board {
            continue;
        }
        let child = minimize(
            cfg,
            shifted,
            depth - 1,
            chosen.or(Some(dir)),
            alpha,
            beta,
            nodes,
        );
        if child.score > best.score {
            best = child;
        }
        if cfg.pruning {
            alpha = alpha.max(best.score);
            if alpha >= beta {
                break;
            }
        }
    }
    best
}

/// Spawn-environment ply. Considers a 2 and a 4 in every empty cell and
/// keeps the lowest score: the environment is modeled as trying to keep the
/// game alive.
pub(crate) fn minimize(
    cfg: &SearchConfig,
    board: Board,
    depth: u32,
    chosen: Option<Move>,
    alpha: f64,
    mut beta: f64,
    nodes: &mut u64,
) -> NodeResult {
    *nodes += 1;
    if depth == 0 || board.is_lost() {
        return NodeResult {
            score: evaluate(&board, cfg.weights),
            dir: chosen,
        };
    }
    let mut best = NodeResult {
        score: f64::MAX,
        dir: chosen,
    };
    'cells: for idx in board.empty_cells() {
        for value in [2, 4] {
            let child = maximize(
                cfg,
                board.with_tile(idx, value),
                depth - 1,
                chosen,
                alpha,
                beta,
                nodes,
            );
            if child.score < best.score {
                best = child;
            }
            if cfg.pruning {
                beta = beta.min(best.score);
                if beta <= alpha {
                    break 'cells;
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameState;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn board(cells: [u32; 16]) -> Board {
        Board::from_cells(cells)
    }

    fn playout_boards(seed: u64, count: usize) -> Vec<Board> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new(&mut rng);
        let mut boards = vec![*state.board()];
        while boards.len() < count && !state.is_lost() {
            let moves = state.legal_moves();
            let dir = moves[rng.gen_range(0..moves.len())];
            state = state.apply_move_and_spawn(dir, &mut rng);
            boards.push(*state.board());
        }
        boards
    }

    #[test]
    fn best_move_is_always_legal() {
        let mut search = Minimax::with_config(SearchConfig {
            max_depth: 2,
            ..Default::default()
        });
        for b in playout_boards(21, 40) {
            let legal = b.legal_moves();
            match search.best_move(b) {
                Some(dir) => assert!(legal.contains(&dir), "illegal {:?} on {:?}", dir, b),
                None => assert!(legal.is_empty()),
            }
        }
    }

    #[test]
    fn depth_zero_evaluates_immediately() {
        let mut search = Minimax::with_config(SearchConfig {
            max_depth: 0,
            ..Default::default()
        });
        let b = board([2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let (score, dir) = search.search(b);
        assert_eq!(score, evaluate(&b, search.config().weights));
        assert_eq!(dir, None);
    }

    #[test]
    fn lost_board_yields_no_move() {
        let lost = board([2, 4, 2, 4, 4, 2, 4, 2, 2, 4, 2, 4, 4, 2, 4, 2]);
        let mut search = Minimax::new();
        let (score, dir) = search.search(lost);
        assert_eq!(score, f64::MAX);
        assert_eq!(dir, None);
    }

    #[test]
    fn pruning_never_changes_the_outcome() {
        let pruned_cfg = SearchConfig {
            max_depth: 3,
            ..Default::default()
        };
        let unpruned_cfg = SearchConfig {
            pruning: false,
            ..pruned_cfg.clone()
        };
        let mut pruned = Minimax::with_config(pruned_cfg);
        let mut unpruned = Minimax::with_config(unpruned_cfg);
        for b in playout_boards(99, 25) {
            let (ps, pm) = pruned.search(b);
            let (us, um) = unpruned.search(b);
            assert_eq!(pm, um, "move differs on {:?}", b);
            assert_eq!(ps, us, "score differs on {:?}", b);
            assert!(pruned.last_stats().nodes <= unpruned.last_stats().nodes);
        }
    }

    #[test]
    fn prefers_the_branch_that_fills_the_board() {
        // Merging the pair keeps the board emptier; sliding without a merge
        // scores higher under the default weights.
        let b = board([2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let mut search = Minimax::with_config(SearchConfig {
            max_depth: 1,
            ..Default::default()
        });
        // Up is a no-op; Left and Right both merge the pair. Down is the
        // only branch that keeps two tiles on the board.
        assert_eq!(search.best_move(b), Some(Move::Down));
    }

    #[test]
    fn search_counts_nodes() {
        let mut search = Minimax::with_config(SearchConfig {
            max_depth: 2,
            ..Default::default()
        });
        let b = board([2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        search.search(b);
        let stats = search.last_stats();
        assert!(stats.nodes > 1);
        assert!(stats.peak_nodes >= stats.nodes);
        search.reset_stats();
        assert_eq!(search.last_stats().nodes, 0);
    }
}
