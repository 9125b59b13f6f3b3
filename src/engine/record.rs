//! The persisted representation of one game's full state.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::Serialize;

use super::types::{Board, GameStatus, Outcome, Player};

/// Full state of one game as persisted in the record store.
///
/// Records are only mutated by producing a new value: the move-resolution
/// engine returns an updated copy and [`GameRecord::reset`] returns a fresh
/// initial state. Fields are private; construction outside the engine goes
/// through the validated store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GameRecord {
    /// Unique identifier, assigned at creation.
    id: i32,
    /// The board.
    board: Board,
    /// Player to move while in progress; frozen at the last active player
    /// once the game completes (deliberate: the record reflects who played
    /// last, not who would play next).
    whose_turn: Player,
    /// Lifecycle stage.
    status: GameStatus,
    /// Terminal or non-terminal classification.
    outcome: Outcome,
    /// The winning player, present iff the outcome is a win.
    winner: Option<Player>,
    /// Creation time, immutable after creation.
    created_at: NaiveDateTime,
    /// Refreshed on every state transition.
    updated_at: NaiveDateTime,
}

impl GameRecord {
    /// Creates the initial state for a new game: empty board, X to move,
    /// in progress, no outcome.
    pub fn initial(id: i32, now: NaiveDateTime) -> Self {
        Self {
            id,
            board: Board::new(),
            whose_turn: Player::X,
            status: GameStatus::InProgress,
            outcome: Outcome::Ongoing,
            winner: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Resets this game to the initial state, preserving the identifier and
    /// original creation time.
    pub fn reset(&self, now: NaiveDateTime) -> Self {
        Self {
            id: self.id,
            board: Board::new(),
            whose_turn: Player::X,
            status: GameStatus::InProgress,
            outcome: Outcome::Ongoing,
            winner: None,
            created_at: self.created_at,
            updated_at: now,
        }
    }

    /// Assembles a record from already-decoded parts (store boundary and
    /// engine output only).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: i32,
        board: Board,
        whose_turn: Player,
        status: GameStatus,
        outcome: Outcome,
        winner: Option<Player>,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            board,
            whose_turn,
            status,
            outcome,
            winner,
            created_at,
            updated_at,
        }
    }

    /// Checks the cross-field invariants that the types alone cannot express.
    ///
    /// Used once at the store boundary after decoding a row; everything
    /// downstream trusts a validated record.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.winner != self.outcome.winner() {
            return Err("winner must be present iff the outcome is that player's win");
        }
        let completed = self.status == GameStatus::Completed;
        if completed != self.outcome.is_terminal() {
            return Err("status must be completed iff the outcome is terminal");
        }
        Ok(())
    }
}
