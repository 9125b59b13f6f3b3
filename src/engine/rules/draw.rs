//! Draw detection.

use tracing::instrument;

use crate::engine::types::Board;

/// Checks if the board is full.
///
/// A full board with no winning triple for the just-moved player is a draw;
/// the engine checks for a win first, so this predicate alone decides the
/// draw case.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}
