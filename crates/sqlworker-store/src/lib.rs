//! sqlworker store - the SQLite engine behind the dispatcher
//!
//! Provides:
//! - `SqliteEngineLoader`, the production `EngineLoader`
//! - In-memory databases backed by a bundled SQLite through rusqlite
//! - Helpers mapping rusqlite failures onto worker errors

pub mod db;
pub mod engine;
pub mod errors;

pub use engine::{SqliteDatabase, SqliteEngine, SqliteEngineLoader};
