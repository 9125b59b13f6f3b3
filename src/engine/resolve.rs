//! The move-resolution engine.
//!
//! A pure function over game records: it validates a proposed move against
//! the current record, applies it, and computes the resulting record with
//! win/draw classification. No I/O, no shared state; the clock is an
//! explicit argument.

use chrono::NaiveDateTime;
use tracing::instrument;

use super::error::MoveError;
use super::record::GameRecord;
use super::rules::{draw, win};
use super::types::{Cell, GameStatus, Outcome, Player};

/// Resolves one proposed move against the current record.
///
/// Preconditions are checked in a fixed order and the first violation wins;
/// on any failure the input record is untouched and nothing is produced.
/// On success a new record is returned with one cell filled, the outcome
/// classified, and `updated_at` set to `now`.
///
/// `whose_turn` flips to the opponent while the game continues. When the
/// move completes the game it stays at the player who just moved, so a
/// completed record names the last active player.
///
/// # Errors
///
/// Returns the [`MoveError`] for the first violated precondition:
/// completed game, unstarted game, wrong turn, position out of range,
/// position occupied.
#[instrument(skip(record), fields(game_id = record.id()))]
pub fn resolve_move(
    record: &GameRecord,
    position: usize,
    player: Player,
    now: NaiveDateTime,
) -> Result<GameRecord, MoveError> {
    match record.status() {
        GameStatus::Completed => return Err(MoveError::GameAlreadyCompleted),
        GameStatus::Waiting => return Err(MoveError::GameNotStarted),
        GameStatus::InProgress => {}
    }
    if player != *record.whose_turn() {
        return Err(MoveError::WrongTurn {
            expected: *record.whose_turn(),
        });
    }
    if position > 8 {
        return Err(MoveError::PositionOutOfRange { position });
    }
    if !record.board().is_empty(position) {
        return Err(MoveError::PositionOccupied { position });
    }

    let mut board = record.board().clone();
    board.set(position, Cell::Occupied(player));

    // Only the mover's mark can have just completed a triple.
    let outcome = if win::is_winning(&board, player) {
        Outcome::win_for(player)
    } else if draw::is_full(&board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    };

    let status = if outcome.is_terminal() {
        GameStatus::Completed
    } else {
        GameStatus::InProgress
    };
    let whose_turn = if outcome.is_terminal() {
        player
    } else {
        player.opponent()
    };

    Ok(GameRecord::from_parts(
        *record.id(),
        board,
        whose_turn,
        status,
        outcome,
        outcome.winner(),
        *record.created_at(),
        now,
    ))
}
