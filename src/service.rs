//! Game service: ties the record store to the move-resolution engine.
//!
//! Each move or reset is one atomic read-modify-write cycle: read the
//! current record, run the pure engine, persist the result. A process-wide
//! mutex serializes those cycles so concurrent moves on the same game never
//! interleave through the store.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDateTime, Utc};
use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument, warn};

use crate::engine::{self, GameRecord, MoveError, Player};
use crate::store::{DbError, GameRepository};

/// Failures surfaced by the game service.
#[derive(Debug, Display, Error, From)]
pub enum ServiceError {
    /// No game exists with the given identifier.
    #[display("game {id} not found")]
    #[from(ignore)]
    NotFound {
        /// The unknown identifier.
        id: i32,
    },
    /// The engine rejected the move.
    #[display("{_0}")]
    Move(MoveError),
    /// The record store failed.
    #[display("{_0}")]
    Db(DbError),
}

impl ServiceError {
    /// Stable machine-readable tag for this failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "not_found",
            ServiceError::Move(e) => e.kind(),
            ServiceError::Db(_) => "database_error",
        }
    }
}

/// Orchestrates game operations over a [`GameRepository`].
#[derive(Debug, Clone)]
pub struct GameService {
    repository: GameRepository,
    write_lock: Arc<Mutex<()>>,
}

impl GameService {
    /// Creates a service over the given repository.
    pub fn new(repository: GameRepository) -> Self {
        Self {
            repository,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    /// The guard serializing read-modify-write cycles. A poisoned lock is
    /// recovered; the store itself never holds partial state.
    fn lock_writes(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Creates a new game in its initial state.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if the store fails.
    #[instrument(skip(self))]
    pub fn create(&self) -> Result<GameRecord, ServiceError> {
        let record = self.repository.create_game(Self::now())?;
        info!(game_id = record.id(), "Game created");
        Ok(record)
    }

    /// Gets a game by identifier; absent games are `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if the store fails.
    #[instrument(skip(self))]
    pub fn get(&self, id: i32) -> Result<Option<GameRecord>, ServiceError> {
        Ok(self.repository.get_game(id)?)
    }

    /// Lists all games, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if the store fails.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<GameRecord>, ServiceError> {
        Ok(self.repository.list_games()?)
    }

    /// Applies one move to the given game and persists the result.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown identifier,
    /// [`ServiceError::Move`] when the engine rejects the move, and
    /// [`ServiceError::Db`] if the store fails.
    #[instrument(skip(self))]
    pub fn make_move(
        &self,
        id: i32,
        position: usize,
        player: Player,
    ) -> Result<GameRecord, ServiceError> {
        let _guard = self.lock_writes();

        let current = self
            .repository
            .get_game(id)?
            .ok_or(ServiceError::NotFound { id })?;

        let updated = match engine::resolve_move(&current, position, player, Self::now()) {
            Ok(updated) => updated,
            Err(e) => {
                warn!(game_id = id, position, %player, error = %e, "Move rejected");
                return Err(ServiceError::Move(e));
            }
        };

        let persisted = self.repository.update_game(&updated)?;
        debug!(game_id = id, board = %persisted.board().display(), "Move applied");
        info!(
            game_id = id,
            position,
            %player,
            outcome = ?persisted.outcome(),
            "Move resolved"
        );
        Ok(persisted)
    }

    /// Resets the given game to its initial state, preserving the
    /// identifier and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown identifier and
    /// [`ServiceError::Db`] if the store fails.
    #[instrument(skip(self))]
    pub fn reset(&self, id: i32) -> Result<GameRecord, ServiceError> {
        let _guard = self.lock_writes();

        let current = self
            .repository
            .get_game(id)?
            .ok_or(ServiceError::NotFound { id })?;

        let fresh = current.reset(Self::now());
        let persisted = self.repository.update_game(&fresh)?;
        info!(game_id = id, "Game reset");
        Ok(persisted)
    }
}
