use crate::engine::Board;

use super::EvalWeights;

/// Evaluate how close a board is to losing. Higher is closer.
///
/// A terminal board returns `f64::MAX` so that it dominates every
/// non-terminal value. Otherwise the score is
/// `fill * (15 - empty_cells) - adjacency * adjacent_equal_count`: filling
/// the board is progress, while equal neighbors are future merges that keep
/// the game alive. The board is never fully empty once a game has started,
/// so 15 is the highest reachable empty-cell count.
pub fn evaluate(board: &Board, weights: EvalWeights) -> f64 {
    if board.is_lost() {
        return f64::MAX;
    }
    let occupied = 15.0 - board.count_empty() as f64;
    weights.fill * occupied - weights.adjacency * f64::from(adjacent_equal_count(board))
}

/// Count, over every cell, the in-bounds orthogonal neighbors holding the
/// same value. Each physical adjacency is seen from both endpoints, so the
/// total is double the pair count; the weights are calibrated against this
/// doubled scale.
pub fn adjacent_equal_count(board: &Board) -> u32 {
    let cells = board.cells();
    let mut count = 0;
    for i in 0..16 {
        let v = cells[i];
        if i >= 4 && cells[i - 4] == v {
            count += 1;
        }
        if i < 12 && cells[i + 4] == v {
            count += 1;
        }
        if i % 4 > 0 && cells[i - 1] == v {
            count += 1;
        }
        if i % 4 < 3 && cells[i + 1] == v {
            count += 1;
        }
    }
    count
}
