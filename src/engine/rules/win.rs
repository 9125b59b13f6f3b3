//! Win detection.

use tracing::instrument;

use crate::engine::types::{Board, Cell, Player};

/// The 8 index triples that constitute a win when uniformly occupied:
/// 3 rows, 3 columns, 2 diagonals.
pub const TRIPLES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks whether the given player holds a complete triple.
///
/// Only the player who just moved can have just won, so the caller passes
/// that player's mark and the other mark is never examined.
#[instrument(skip(board))]
pub fn is_winning(board: &Board, player: Player) -> bool {
    let mark = Cell::Occupied(player);
    TRIPLES
        .iter()
        .any(|triple| triple.iter().all(|&pos| board.get(pos) == Some(mark)))
}
