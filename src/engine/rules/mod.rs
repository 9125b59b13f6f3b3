//! Pure rule predicates for the grid game.
//!
//! Win and draw evaluation separated from board storage so the resolution
//! engine composes them without owning the rules.

pub mod draw;
pub mod win;
