//! Row models and the row-to-record validation boundary.
//!
//! The board column is a fixed 9-character text encoding (`X`, `O`, `.` per
//! cell, row-major); enum columns hold lowercase tokens. Every field is
//! decoded and validated exactly once when a row becomes a [`GameRecord`];
//! nothing downstream re-checks.

use chrono::NaiveDateTime;
use derive_new::new;
use diesel::prelude::*;

use crate::engine::{Board, Cell, GameRecord, GameStatus, Outcome, Player};
use crate::store::{DbError, schema};

/// Raw games row as stored in sqlite.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: i32,
    board: String,
    whose_turn: String,
    status: String,
    outcome: String,
    winner: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRow {
    /// Decodes this row into a validated [`GameRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any column holds a malformed value or the
    /// decoded record violates a cross-field invariant.
    pub fn into_record(self) -> Result<GameRecord, DbError> {
        let board = board_from_db(&self.board)?;
        let whose_turn = player_from_db(&self.whose_turn)?;
        let status = status_from_db(&self.status)?;
        let outcome = outcome_from_db(&self.outcome)?;
        let winner = self.winner.as_deref().map(player_from_db).transpose()?;

        let record = GameRecord::from_parts(
            self.id,
            board,
            whose_turn,
            status,
            outcome,
            winner,
            self.created_at,
            self.updated_at,
        );
        record
            .validate()
            .map_err(|reason| DbError::new(format!("Invalid game row {}: {}", self.id, reason)))?;
        Ok(record)
    }
}

/// Insertable games row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    board: String,
    whose_turn: String,
    status: String,
    outcome: String,
    winner: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl NewGameRow {
    /// Builds the row for a freshly created game; the id is assigned by
    /// sqlite on insert.
    pub fn initial(now: NaiveDateTime) -> Self {
        Self::new(
            board_to_db(&Board::new()),
            player_to_db(Player::X).to_string(),
            status_to_db(GameStatus::InProgress).to_string(),
            outcome_to_db(Outcome::Ongoing).to_string(),
            None,
            now,
            now,
        )
    }
}

/// Changeset for persisting an updated record over its existing row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::games)]
pub struct GameChangeset {
    board: String,
    whose_turn: String,
    status: String,
    outcome: String,
    winner: Option<Option<String>>,
    updated_at: NaiveDateTime,
}

impl From<&GameRecord> for GameChangeset {
    fn from(record: &GameRecord) -> Self {
        Self {
            board: board_to_db(record.board()),
            whose_turn: player_to_db(*record.whose_turn()).to_string(),
            status: status_to_db(*record.status()).to_string(),
            outcome: outcome_to_db(*record.outcome()).to_string(),
            winner: Some(record.winner().map(|p| player_to_db(p).to_string())),
            updated_at: *record.updated_at(),
        }
    }
}

fn player_to_db(player: Player) -> &'static str {
    match player {
        Player::X => "x",
        Player::O => "o",
    }
}

fn player_from_db(s: &str) -> Result<Player, DbError> {
    match s {
        "x" => Ok(Player::X),
        "o" => Ok(Player::O),
        _ => Err(DbError::new(format!("Invalid player: '{}'", s))),
    }
}

fn status_to_db(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Waiting => "waiting",
        GameStatus::InProgress => "in_progress",
        GameStatus::Completed => "completed",
    }
}

fn status_from_db(s: &str) -> Result<GameStatus, DbError> {
    match s {
        "waiting" => Ok(GameStatus::Waiting),
        "in_progress" => Ok(GameStatus::InProgress),
        "completed" => Ok(GameStatus::Completed),
        _ => Err(DbError::new(format!("Invalid status: '{}'", s))),
    }
}

fn outcome_to_db(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Ongoing => "ongoing",
        Outcome::XWins => "x_wins",
        Outcome::OWins => "o_wins",
        Outcome::Draw => "draw",
    }
}

fn outcome_from_db(s: &str) -> Result<Outcome, DbError> {
    match s {
        "ongoing" => Ok(Outcome::Ongoing),
        "x_wins" => Ok(Outcome::XWins),
        "o_wins" => Ok(Outcome::OWins),
        "draw" => Ok(Outcome::Draw),
        _ => Err(DbError::new(format!("Invalid outcome: '{}'", s))),
    }
}

fn board_to_db(board: &Board) -> String {
    board
        .cells()
        .iter()
        .map(|cell| match cell {
            Cell::Empty => '.',
            Cell::Occupied(Player::X) => 'X',
            Cell::Occupied(Player::O) => 'O',
        })
        .collect()
}

fn board_from_db(s: &str) -> Result<Board, DbError> {
    let mut cells = [Cell::Empty; 9];
    let mut chars = s.chars();
    for (pos, slot) in cells.iter_mut().enumerate() {
        let c = chars
            .next()
            .ok_or_else(|| DbError::new(format!("Board too short: '{}'", s)))?;
        *slot = match c {
            '.' => Cell::Empty,
            'X' => Cell::Occupied(Player::X),
            'O' => Cell::Occupied(Player::O),
            _ => {
                return Err(DbError::new(format!(
                    "Invalid board cell '{}' at position {}",
                    c, pos
                )));
            }
        };
    }
    if chars.next().is_some() {
        return Err(DbError::new(format!("Board too long: '{}'", s)));
    }
    Ok(Board::from_cells(cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_round_trip() {
        let mut board = Board::new();
        board.set(0, Cell::Occupied(Player::X));
        board.set(4, Cell::Occupied(Player::O));
        let encoded = board_to_db(&board);
        assert_eq!(encoded, "X...O....");
        assert_eq!(board_from_db(&encoded).unwrap(), board);
    }

    #[test]
    fn test_board_rejects_wrong_length() {
        assert!(board_from_db("X.O").is_err());
        assert!(board_from_db("X.O.X.O.X.").is_err());
    }

    #[test]
    fn test_board_rejects_unknown_mark() {
        assert!(board_from_db("X.Z......").is_err());
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        assert!(player_from_db("q").is_err());
        assert!(status_from_db("paused").is_err());
        assert!(outcome_from_db("forfeit").is_err());
    }
}
