//! sqlworker runtime - hosts a dispatcher in its own worker context
//!
//! A worker is a dedicated OS thread driving a single-threaded tokio
//! runtime. The host posts JSON messages in and receives responses out, one
//! response per message, in the order the messages were posted.

pub mod worker;

pub use worker::{Worker, WorkerHandle, WORKER_THREAD_NAME};
