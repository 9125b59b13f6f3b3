//! Move-resolution error taxonomy.

use derive_more::{Display, Error};

use super::types::Player;

/// Why a proposed move was rejected.
///
/// One variant per engine precondition. Every failure is deterministic and
/// caused by the caller's input or stale state; retrying with the same input
/// never succeeds, so callers translate rather than retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The game already reached a terminal outcome.
    #[display("game is already completed")]
    GameAlreadyCompleted,
    /// The game has not started; only in-progress games accept moves.
    #[display("game has not started")]
    GameNotStarted,
    /// The proposed mover is not the player whose turn it is.
    #[display("it is {expected}'s turn")]
    WrongTurn {
        /// The player whose turn it actually is.
        expected: Player,
    },
    /// The position is outside the board. Upstream parsing should already
    /// rule this out; the engine checks anyway.
    #[display("position {position} is out of range (0-8)")]
    PositionOutOfRange {
        /// The rejected position.
        position: usize,
    },
    /// The position already holds a mark.
    #[display("position {position} is already occupied")]
    PositionOccupied {
        /// The rejected position.
        position: usize,
    },
}

impl MoveError {
    /// Stable machine-readable tag for this failure kind, so clients can
    /// dispatch without matching on display strings.
    pub fn kind(&self) -> &'static str {
        match self {
            MoveError::GameAlreadyCompleted => "game_already_completed",
            MoveError::GameNotStarted => "game_not_started",
            MoveError::WrongTurn { .. } => "wrong_turn",
            MoveError::PositionOutOfRange { .. } => "position_out_of_range",
            MoveError::PositionOccupied { .. } => "position_occupied",
        }
    }
}
