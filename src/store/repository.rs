//! Sqlite-backed record store for games.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::engine::GameRecord;
use crate::store::models::{GameChangeset, GameRow, NewGameRow};
use crate::store::{DbError, schema};

/// Record store keyed by game identifier.
///
/// Opens one connection per operation; each call is a single atomic
/// statement against the store. Serializing read-modify-write cycles across
/// calls is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests, though
    /// each operation then sees a fresh database; prefer a temp file).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Creates a new game in its initial state; the identifier is assigned
    /// by the store.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn create_game(&self, now: NaiveDateTime) -> Result<GameRecord, DbError> {
        debug!("Creating game");
        let mut conn = self.connection()?;

        let row = diesel::insert_into(schema::games::table)
            .values(NewGameRow::initial(now))
            .returning(GameRow::as_returning())
            .get_result::<GameRow>(&mut conn)?;

        let record = row.into_record()?;
        info!(game_id = record.id(), "Game created");
        Ok(record)
    }

    /// Gets a game by identifier. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or the stored row is
    /// malformed.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: i32) -> Result<Option<GameRecord>, DbError> {
        debug!(game_id = id, "Looking up game");
        let mut conn = self.connection()?;

        let row = schema::games::table
            .find(id)
            .first::<GameRow>(&mut conn)
            .optional()?;

        match row {
            Some(row) => {
                debug!(game_id = id, "Game found");
                Ok(Some(row.into_record()?))
            }
            None => {
                debug!(game_id = id, "Game not found");
                Ok(None)
            }
        }
    }

    /// Persists an updated record over its existing row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the identifier is unknown or a database error
    /// occurs.
    #[instrument(skip(self, record), fields(game_id = record.id()))]
    pub fn update_game(&self, record: &GameRecord) -> Result<GameRecord, DbError> {
        debug!(board = %record.board().display(), "Persisting game");
        let mut conn = self.connection()?;

        let row = diesel::update(schema::games::table.find(record.id()))
            .set(GameChangeset::from(record))
            .returning(GameRow::as_returning())
            .get_result::<GameRow>(&mut conn)
            .optional()?
            .ok_or_else(|| DbError::new(format!("No game with id {}", record.id())))?;

        let persisted = row.into_record()?;
        info!(game_id = persisted.id(), outcome = ?persisted.outcome(), "Game persisted");
        Ok(persisted)
    }

    /// Lists all games, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a stored row is
    /// malformed.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameRecord>, DbError> {
        debug!("Listing all games");
        let mut conn = self.connection()?;

        let rows = schema::games::table
            .order((
                schema::games::created_at.desc(),
                schema::games::id.desc(),
            ))
            .load::<GameRow>(&mut conn)?;

        let records = rows
            .into_iter()
            .map(GameRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = records.len(), "Games loaded");
        Ok(records)
    }
}
