//! Move-resolution engine: domain types, rules, and the pure resolution
//! function.

mod error;
mod record;
mod resolve;
pub mod rules;
mod types;

pub use error::MoveError;
pub use record::GameRecord;
pub use resolve::resolve_move;
pub use types::{Board, Cell, GameStatus, Outcome, Player};
