//! Engine capability consumed by the dispatcher
//!
//! The SQL engine is an external collaborator: the dispatcher only needs to
//! initialize it, create a database, run statements and close the database.

use crate::errors::Result;
use crate::resolver::ResourceResolver;
use async_trait::async_trait;

/// Loads the engine, locating its binary payload through `resolver`
///
/// Initialization is the only operation that suspends.
#[async_trait]
pub trait EngineLoader: Send + Sync {
    /// # Errors
    ///
    /// Returns `WorkerError::EngineInit` when the payload is unreachable,
    /// incompatible or malformed.
    async fn initialize(&self, resolver: &dyn ResourceResolver) -> Result<Box<dyn Engine>>;
}

/// An initialized engine
pub trait Engine: Send {
    /// Create a new, empty database instance
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::EngineInit` if the instance cannot be created.
    fn new_database(&self) -> Result<Box<dyn DatabaseHandle>>;
}

/// One open database instance
pub trait DatabaseHandle: Send {
    /// Run one or more statements
    ///
    /// Rows produced by queries are discarded. Whether earlier statements of
    /// a failing batch stay applied is up to the engine.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Execution` carrying the engine's message.
    fn exec(&mut self, sql: &str) -> Result<()>;

    /// Release engine resources
    ///
    /// # Errors
    ///
    /// Engine-specific; the dispatcher logs and discards it.
    fn close(self: Box<Self>) -> Result<()>;
}
