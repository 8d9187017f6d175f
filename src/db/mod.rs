//! Database module: models and schema for the trivia store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL and the bundled sample data (SQLite-first)
//! - `sqlite.rs`: pool construction and the `TriviaStorage` handle

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Category, NewQuestion, Question};
pub use schema::{SQLITE_INIT, SQLITE_SEED};
pub use sqlite::{QuestionFilter, QuestionPage, SqlitePool, TriviaStorage, connect};
