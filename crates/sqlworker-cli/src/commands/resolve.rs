//! Resolve command
//!
//! Usage: sqlworker resolve [NAME] [--wasm-path <PATH>] [--config <PATH>]
//!
//! Prints the location the worker would hand the engine for NAME, using
//! the same rules as an `open` carrying `sqlite3WasmPath`.

use clap::Args;
use sqlworker_core::{AssetResolver, ResourceResolver, DEFAULT_ASSET_NAME};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Logical asset name requested by the engine
    #[arg(default_value = DEFAULT_ASSET_NAME)]
    pub name: String,

    /// Same as the `sqlite3WasmPath` open option
    #[arg(long)]
    pub wasm_path: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides the configured built-in location
    #[arg(long)]
    pub builtin_asset_path: Option<String>,
}

/// Execute resolve command
pub fn execute(args: ResolveArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref(), args.builtin_asset_path, false, None)?;
    let resolver = AssetResolver::new(args.wasm_path, config.builtin_asset_path);
    println!("{}", resolver.locate(&args.name));
    Ok(())
}
