//! rusqlite-backed engine
//!
//! SQLite is linked into the binary, so there is no payload to fetch. The
//! resolver is still consulted for the default asset so the location is
//! recorded, and `require_asset` turns that location into a hard check.

use crate::db;
use crate::errors::{asset_malformed, asset_unreachable, from_rusqlite_close, from_rusqlite_exec, Result};
use async_trait::async_trait;
use rusqlite::Connection;
use sqlworker_core::logging_facility::elapsed_ms;
use sqlworker_core::{
    log_op_end, log_op_error, log_op_start, DatabaseHandle, Engine, EngineLoader, ResourceResolver,
    WorkerConfig, DEFAULT_ASSET_NAME,
};
use sqlworker_core_types::schema::OP_ENGINE_INIT;
use std::time::Instant;

/// Production `EngineLoader`
#[derive(Debug, Clone, Default)]
pub struct SqliteEngineLoader {
    require_asset: bool,
}

impl SqliteEngineLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::new().require_asset(config.require_asset)
    }

    /// Fail initialization unless the resolved asset is a readable,
    /// non-empty file
    pub fn require_asset(mut self, require: bool) -> Self {
        self.require_asset = require;
        self
    }

    /// Initialize and return the concrete engine
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::EngineInit` when the asset check or the engine
    /// self-check fails.
    pub async fn load(&self, resolver: &dyn ResourceResolver) -> Result<SqliteEngine> {
        let start = Instant::now();
        let asset_location = resolver.locate(DEFAULT_ASSET_NAME);
        log_op_start!(
            OP_ENGINE_INIT,
            asset_path = asset_location.as_str(),
            require_asset = self.require_asset
        );

        match self.bring_up(asset_location).await {
            Ok(engine) => {
                log_op_end!(
                    OP_ENGINE_INIT,
                    duration_ms = elapsed_ms(start),
                    engine_version = engine.version.as_str()
                );
                Ok(engine)
            }
            Err(err) => {
                log_op_error!(OP_ENGINE_INIT, err.clone(), duration_ms = elapsed_ms(start));
                Err(err)
            }
        }
    }

    async fn bring_up(&self, asset_location: String) -> Result<SqliteEngine> {
        if self.require_asset {
            verify_asset(&asset_location).await?;
        }
        let version = db::self_check()?;
        Ok(SqliteEngine {
            asset_location,
            version,
        })
    }
}

#[async_trait]
impl EngineLoader for SqliteEngineLoader {
    async fn initialize(&self, resolver: &dyn ResourceResolver) -> Result<Box<dyn Engine>> {
        let engine = self.load(resolver).await?;
        Ok(Box::new(engine))
    }
}

async fn verify_asset(location: &str) -> Result<()> {
    let file = tokio::fs::File::open(location)
        .await
        .map_err(|e| asset_unreachable(location, e))?;
    let metadata = file
        .metadata()
        .await
        .map_err(|e| asset_unreachable(location, e))?;
    if !metadata.is_file() || metadata.len() == 0 {
        return Err(asset_malformed(location));
    }
    Ok(())
}

/// An initialized SQLite engine
#[derive(Debug, Clone)]
pub struct SqliteEngine {
    asset_location: String,
    version: String,
}

impl SqliteEngine {
    /// Where the default asset resolved to during initialization
    pub fn asset_location(&self) -> &str {
        &self.asset_location
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Create a concrete database
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::EngineInit` if SQLite cannot open a connection.
    pub fn open_database(&self) -> Result<SqliteDatabase> {
        Ok(SqliteDatabase {
            conn: db::open_in_memory()?,
        })
    }
}

impl Engine for SqliteEngine {
    fn new_database(&self) -> Result<Box<dyn DatabaseHandle>> {
        Ok(Box::new(self.open_database()?))
    }
}

/// One in-memory SQLite database
#[derive(Debug)]
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl DatabaseHandle for SqliteDatabase {
    fn exec(&mut self, sql: &str) -> Result<()> {
        db::exec_batch(&self.conn, sql).map_err(from_rusqlite_exec)
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_conn, err)| from_rusqlite_close(err))
    }
}
