//! Error handling for sqlworker-store
//!
//! Maps rusqlite and asset failures onto `WorkerError` so the dispatcher
//! can report the engine's own message text.

use sqlworker_core::errors::WorkerError;

pub use sqlworker_core::errors::Result;

/// Engine could not be brought up
pub fn from_rusqlite_init(err: rusqlite::Error) -> WorkerError {
    WorkerError::engine_init(err)
}

/// A statement failed; the message is SQLite's own text
pub fn from_rusqlite_exec(err: rusqlite::Error) -> WorkerError {
    WorkerError::execution(err)
}

/// Closing a connection failed
pub fn from_rusqlite_close(err: rusqlite::Error) -> WorkerError {
    WorkerError::execution(format!("close failed: {}", err))
}

/// The resolved payload location could not be read
pub fn asset_unreachable(location: &str, err: std::io::Error) -> WorkerError {
    WorkerError::engine_init(format!("asset unreachable: {}: {}", location, err))
}

/// The resolved payload exists but is not usable
pub fn asset_malformed(location: &str) -> WorkerError {
    WorkerError::engine_init(format!("asset malformed: {}", location))
}

/// The linked SQLite library is not one this worker speaks to
pub fn engine_incompatible(version: &str) -> WorkerError {
    WorkerError::engine_init(format!("incompatible engine version: {}", version))
}
