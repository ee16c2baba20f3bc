// Postgres storage layer with sqlx
//
// One append-only table of game result rows. Rows are immutable once
// written; the only write is a single-row insert.

pub mod models;
pub mod repositories;

pub use models::*;
pub use repositories::Database;
