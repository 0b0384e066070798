//! Command dispatcher
//!
//! The dispatcher is a state machine keyed on the command:
//!
//! | handle  | open                              | close           | execute                     |
//! |---------|-----------------------------------|-----------------|-----------------------------|
//! | absent  | present on success                | no-op, success  | error "Database not open"   |
//! | present | old handle closed, new installed  | closed, absent  | runs; state unchanged       |
//!
//! A failed `open` leaves the session exactly as it was. Every call
//! produces exactly one `Response`; engine failures never escape as panics
//! or errors.

use crate::config::WorkerConfig;
use crate::engine::{DatabaseHandle, EngineLoader};
use crate::errors::{Result, WorkerError};
use crate::logging_facility::elapsed_ms;
use crate::protocol::{Command, OpenOptions, Response};
use crate::resolver::AssetResolver;
use crate::session::SessionState;
use crate::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use sqlworker_core_types::schema::{OP_CLOSE, OP_DECODE, OP_EXECUTE, OP_OPEN};
use sqlworker_core_types::{RequestContext, Sensitive};
use std::time::Instant;
use tracing::Instrument;

/// Owns the session state of one worker context
pub struct Dispatcher<L> {
    loader: L,
    config: WorkerConfig,
    session: SessionState,
}

impl<L: EngineLoader> Dispatcher<L> {
    pub fn new(loader: L, config: WorkerConfig) -> Self {
        Self::with_session(loader, config, SessionState::new())
    }

    pub fn with_session(loader: L, config: WorkerConfig, session: SessionState) -> Self {
        Self {
            loader,
            config,
            session,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Decode and dispatch one raw message
    pub async fn handle_message(&mut self, message: Value) -> Response {
        self.handle_with_context(message, &RequestContext::default())
            .await
    }

    /// Decode and dispatch one raw message inside a correlation span
    pub async fn handle_with_context(&mut self, message: Value, ctx: &RequestContext) -> Response {
        let span = tracing::info_span!(
            "message",
            request_id = %ctx.request_id,
            seq = ctx.seq
        );

        match Command::decode(message) {
            Ok(command) => self.dispatch(command).instrument(span).await,
            Err(err) => {
                let _entered = span.enter();
                log_op_error!(OP_DECODE, err.clone(), duration_ms = 0u64);
                Response::error(err)
            }
        }
    }

    /// Dispatch one decoded command
    pub async fn dispatch(&mut self, command: Command) -> Response {
        match command {
            Command::Open { options } => self.open(options).await.into(),
            Command::Close => {
                self.close();
                Response::ok()
            }
            Command::Execute { sql } => self.execute(&sql).into(),
        }
    }

    /// Close any open handle; used when the worker context is torn down
    pub fn shutdown(&mut self) {
        if self.session.is_open() {
            self.close();
        }
    }

    async fn open(&mut self, options: OpenOptions) -> Result<()> {
        let start = Instant::now();
        let resolver = AssetResolver::from_options(&options, &self.config);
        log_op_start!(OP_OPEN, asset_path = resolver.default_asset_location());

        let database = match self.create_database(&resolver).await {
            Ok(database) => database,
            Err(err) => {
                log_op_error!(OP_OPEN, err.clone(), duration_ms = elapsed_ms(start));
                return Err(err);
            }
        };

        let replaced = match self.session.replace(database) {
            Some(previous) => {
                release(previous);
                true
            }
            None => false,
        };

        log_op_end!(OP_OPEN, duration_ms = elapsed_ms(start), replaced = replaced);
        Ok(())
    }

    async fn create_database(&self, resolver: &AssetResolver) -> Result<Box<dyn DatabaseHandle>> {
        let engine = self.loader.initialize(resolver).await?;
        engine.new_database()
    }

    fn close(&mut self) {
        let start = Instant::now();
        log_op_start!(OP_CLOSE);

        let was_open = match self.session.take() {
            Some(handle) => {
                release(handle);
                true
            }
            None => false,
        };

        log_op_end!(OP_CLOSE, duration_ms = elapsed_ms(start), was_open = was_open);
    }

    fn execute(&mut self, sql: &Sensitive<String>) -> Result<()> {
        let start = Instant::now();
        log_op_start!(OP_EXECUTE, sql_len = sql.len());

        let result = match self.session.handle_mut() {
            Some(handle) => handle.exec(sql.expose()),
            None => Err(WorkerError::NotOpen),
        };

        match &result {
            Ok(()) => {
                log_op_end!(OP_EXECUTE, duration_ms = elapsed_ms(start));
            }
            Err(err) => {
                log_op_error!(OP_EXECUTE, err.clone(), duration_ms = elapsed_ms(start));
            }
        }
        result
    }
}

impl<L> std::fmt::Debug for Dispatcher<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn release(handle: Box<dyn DatabaseHandle>) {
    if let Err(err) = handle.close() {
        tracing::warn!(
            component = module_path!(),
            op = OP_CLOSE,
            error = %err,
            "engine close failed; handle dropped"
        );
    }
}
