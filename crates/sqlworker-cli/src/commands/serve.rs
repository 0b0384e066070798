//! Serve command
//!
//! Usage: sqlworker serve [--config <PATH>] [--builtin-asset-path <PATH>]
//!        [--require-asset] [--log-profile <PROFILE>]
//!
//! Each non-blank stdin line is one JSON message; each produces exactly one
//! JSON response line on stdout, in input order. Logs go to stderr.

use anyhow::Context;
use clap::Args;
use sqlworker_core::logging_facility::{self, Profile};
use sqlworker_core::{Response, WorkerError};
use sqlworker_runtime::{Worker, WorkerHandle};
use sqlworker_store::SqliteEngineLoader;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Location used for the engine payload when `open` names none
    #[arg(long)]
    pub builtin_asset_path: Option<String>,

    /// Fail `open` unless the resolved payload is a readable file
    #[arg(long)]
    pub require_asset: bool,

    /// Logging profile: development, production or test
    #[arg(long)]
    pub log_profile: Option<Profile>,
}

/// Execute serve command
pub fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let config = super::load_config(
        args.config.as_deref(),
        args.builtin_asset_path,
        args.require_asset,
        args.log_profile,
    )?;
    logging_facility::init(config.log_profile);

    let loader = SqliteEngineLoader::from_config(&config);
    let mut worker = Worker::spawn(loader, config).context("failed to start worker")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let handled = serve_lines(&mut worker, stdin.lock(), stdout.lock())?;
    tracing::info!(messages = handled, "stdin closed, shutting down");

    worker.terminate().context("worker did not shut down cleanly")?;
    Ok(())
}

/// Relay JSON lines through `worker` until `reader` is exhausted
///
/// Returns the number of messages answered. Lines that are not UTF-8 JSON
/// are answered with an error response without reaching the worker.
pub fn serve_lines<R, W>(
    worker: &mut WorkerHandle,
    reader: R,
    mut writer: W,
) -> anyhow::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut handled = 0;
    for line in reader.split(b'\n') {
        let line = line.context("failed to read message line")?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = match serde_json::from_slice(&line) {
            Ok(message) => worker.blocking_request(message)?,
            Err(err) => Response::error(WorkerError::invalid_message(err.to_string())),
        };

        serde_json::to_writer(&mut writer, &response.to_message())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }
    Ok(handled)
}
