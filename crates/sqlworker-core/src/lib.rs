//! sqlworker core - protocol, state machine and ambient facilities
//!
//! Provides:
//! - The command/response message protocol spoken between a host and its
//!   database worker
//! - The `Dispatcher` state machine that owns the single database handle
//! - The engine capability traits and the payload resource resolver
//! - Error, logging and configuration facilities shared by every crate

pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod protocol;
pub mod resolver;
pub mod session;

// Re-export key types
pub use config::WorkerConfig;
pub use dispatcher::Dispatcher;
pub use engine::{DatabaseHandle, Engine, EngineLoader};
pub use errors::{ExError, ExErrorKind, Result, WorkerError};
pub use protocol::{Command, EmptyResult, OpenOptions, Response};
pub use resolver::{AssetResolver, ResourceResolver, BUILTIN_ASSET_PATH, DEFAULT_ASSET_NAME};
pub use session::SessionState;
