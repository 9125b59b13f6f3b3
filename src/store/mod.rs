//! Record store: sqlite persistence for game records.

mod error;
mod models;
mod repository;
mod schema; // Diesel schema - internal use only

pub use error::DbError;
pub use repository::GameRepository;
