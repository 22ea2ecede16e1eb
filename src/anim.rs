//! Per-tile displacement for presentation layers.
//!
//! Animating a move needs to know where each tile came from, where it landed,
//! and whether it merged. The authoritative transition in
//! [`crate::engine::Board::shift`] deliberately reports none of that, so this
//! module retraces the same slide/merge resolution and records it. The
//! derivation is best-effort for consumers that want it; replaying the
//! recorded moves always reproduces the `shift` result exactly.

use crate::engine::{Board, Move};

/// One tile's displacement during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    /// Cell the tile started in.
    pub from: usize,
    /// Cell it ended in.
    pub to: usize,
    /// Cells traveled along its line.
    pub distance: usize,
    /// True when the tile combined into an equal tile at `to`.
    pub merged: bool,
}

/// Record every tile that changes position when `board` slides in `dir`.
///
/// Tiles that stay put are omitted; a stationary tile that receives a merge
/// is represented by the arriving tile's entry. Entries within a line appear
/// in resolution order (nearest the destination edge first).
pub fn tile_moves(board: &Board, dir: Move) -> Vec<TileMove> {
    let mut moves = Vec::new();
    for line in dir.lines() {
        let mut write = 0;
        let mut last_merged = false;
        let mut last_val = 0;
        for (read, &cell) in line.iter().enumerate() {
            let val = board.tile(cell);
            if val == 0 {
                continue;
            }
            if write > 0 && !last_merged && last_val == val {
                moves.push(TileMove {
                    from: cell,
                    to: line[write - 1],
                    distance: read - (write - 1),
                    merged: true,
                });
                last_merged = true;
            } else {
                if read != write {
                    moves.push(TileMove {
                        from: cell,
                        to: line[write],
                        distance: read - write,
                        merged: false,
                    });
                }
                last_val = val;
                last_merged = false;
                write += 1;
            }
        }
    }
    moves
}
