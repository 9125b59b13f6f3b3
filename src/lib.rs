//! Gridlock - authoritative rules and persistence for two-player
//! tic-tac-toe.
//!
//! # Architecture
//!
//! - **Engine**: pure move resolution - validate a proposed move, apply it,
//!   classify the resulting board (win/draw/ongoing). No I/O.
//! - **Store**: sqlite-backed record store keyed by game identifier, with a
//!   validated row-to-record boundary.
//! - **Service**: atomic read-modify-write cycles tying engine and store
//!   together.
//! - **Server**: HTTP request layer translating typed results and failure
//!   kinds to JSON responses.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use gridlock::{GameRecord, Player, resolve_move};
//!
//! let now = Utc::now().naive_utc();
//! let game = GameRecord::initial(1, now);
//! let game = resolve_move(&game, 4, Player::X, now)?;
//! assert_eq!(*game.whose_turn(), Player::O);
//! # Ok::<(), gridlock::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod engine;
mod server;
mod service;
mod store;

pub mod cli;

// Crate-level exports - engine
pub use engine::{Board, Cell, GameRecord, GameStatus, MoveError, Outcome, Player, resolve_move};

// Crate-level exports - record store
pub use store::{DbError, GameRepository};

// Crate-level exports - service
pub use service::{GameService, ServiceError};

// Crate-level exports - HTTP request layer
pub use server::{ApiError, MakeMoveRequest, router};
