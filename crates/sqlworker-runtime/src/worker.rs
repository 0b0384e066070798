//! Worker context and its message channels

use serde_json::Value;
use sqlworker_core::logging_facility::elapsed_ms;
use sqlworker_core::{
    log_op_end, log_op_start, Dispatcher, EngineLoader, Response, Result, WorkerConfig,
    WorkerError,
};
use sqlworker_core_types::schema::OP_WORKER;
use sqlworker_core_types::RequestContext;
use std::thread::JoinHandle;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub const WORKER_THREAD_NAME: &str = "sqlworker";

/// Entry point for starting worker contexts
pub struct Worker;

impl Worker {
    /// Start a worker owning a fresh dispatcher
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Io` if the runtime or the thread cannot be
    /// created.
    pub fn spawn<L>(loader: L, config: WorkerConfig) -> Result<WorkerHandle>
    where
        L: EngineLoader + 'static,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| WorkerError::io("build_runtime", e))?;

        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(loader, config);

        let thread = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || runtime.block_on(run_loop(dispatcher, inbound_rx, outbound_tx)))
            .map_err(|e| WorkerError::io("spawn_worker", e))?;

        Ok(WorkerHandle {
            inbound: Some(inbound_tx),
            outbound: outbound_rx,
            thread: Some(thread),
        })
    }
}

/// Receive, dispatch, reply; one message at a time
///
/// The next message is not taken off the channel until the current one has
/// its response, so an `execute` posted right behind an `open` always sees
/// the database that `open` installed.
async fn run_loop<L: EngineLoader>(
    mut dispatcher: Dispatcher<L>,
    mut inbound: UnboundedReceiver<Value>,
    outbound: UnboundedSender<Response>,
) {
    let start = Instant::now();
    log_op_start!(OP_WORKER);

    let mut seq = 0u64;
    while let Some(message) = inbound.recv().await {
        let ctx = RequestContext::new(seq);
        seq += 1;
        let response = dispatcher.handle_with_context(message, &ctx).await;
        if outbound.send(response).is_err() {
            tracing::debug!(op = OP_WORKER, seq = ctx.seq, "host dropped the response channel");
            break;
        }
    }

    dispatcher.shutdown();
    log_op_end!(OP_WORKER, duration_ms = elapsed_ms(start), messages = seq);
}

/// Host side of a running worker
///
/// Dropping the handle closes the inbound channel; the worker then finishes
/// the message in flight, closes any open database and exits.
pub struct WorkerHandle {
    inbound: Option<UnboundedSender<Value>>,
    outbound: UnboundedReceiver<Response>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queue a message without waiting for its response
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::WorkerUnavailable` once the worker has exited.
    pub fn post_message(&self, message: Value) -> Result<()> {
        let inbound = self.inbound.as_ref().ok_or_else(|| unavailable("channel closed"))?;
        inbound
            .send(message)
            .map_err(|_| unavailable("worker has exited"))
    }

    /// Next response, or `None` once the worker has exited and every
    /// response has been delivered
    pub async fn recv(&mut self) -> Option<Response> {
        self.outbound.recv().await
    }

    /// Blocking `recv` for hosts outside an async context
    ///
    /// Must not be called from within a tokio runtime.
    pub fn blocking_recv(&mut self) -> Option<Response> {
        self.outbound.blocking_recv()
    }

    /// Post a message and wait for the next response
    ///
    /// Responses are paired with messages by position, so with earlier
    /// posts still outstanding this returns the oldest undelivered response.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::WorkerUnavailable` if the worker has exited.
    pub async fn request(&mut self, message: Value) -> Result<Response> {
        self.post_message(message)?;
        self.recv()
            .await
            .ok_or_else(|| unavailable("worker exited before responding"))
    }

    /// Blocking `request` for hosts outside an async context
    ///
    /// # Errors
    ///
    /// As `request`.
    pub fn blocking_request(&mut self, message: Value) -> Result<Response> {
        self.post_message(message)?;
        self.blocking_recv()
            .ok_or_else(|| unavailable("worker exited before responding"))
    }

    /// Close the channel and wait for the worker to finish
    ///
    /// Messages already posted are still processed; their responses are
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::WorkerUnavailable` if the worker thread panicked.
    pub fn terminate(mut self) -> Result<()> {
        self.inbound.take();
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| unavailable("worker thread panicked")),
            None => Ok(()),
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.inbound.take();
    }
}

impl std::fmt::Debug for WorkerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerHandle")
            .field("connected", &self.inbound.is_some())
            .finish()
    }
}

fn unavailable(reason: &str) -> WorkerError {
    WorkerError::WorkerUnavailable {
        reason: reason.to_string(),
    }
}
