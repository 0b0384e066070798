//! Engine payload resolution
//!
//! The engine asks for its binary payload by logical name. Only the
//! well-known default name is redirected; everything else passes through.

use crate::config::WorkerConfig;
use crate::protocol::OpenOptions;

/// Logical name under which the engine requests its binary payload
pub const DEFAULT_ASSET_NAME: &str = "sql-wasm.wasm";

/// Location used for the default asset when nothing else is configured
pub const BUILTIN_ASSET_PATH: &str = "sqlite3.wasm";

/// Maps a logical asset name to the path or URL to fetch it from
pub trait ResourceResolver: Send + Sync {
    fn locate(&self, name: &str) -> String;
}

impl<F> ResourceResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn locate(&self, name: &str) -> String {
        self(name)
    }
}

/// Resolver built for one `open` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    wasm_path: Option<String>,
    builtin_default: String,
}

impl AssetResolver {
    /// An empty `wasm_path` counts as unset
    pub fn new(wasm_path: Option<String>, builtin_default: impl Into<String>) -> Self {
        Self {
            wasm_path: wasm_path.filter(|path| !path.is_empty()),
            builtin_default: builtin_default.into(),
        }
    }

    /// The message's `sqlite3WasmPath` wins over the configured default
    pub fn from_options(options: &OpenOptions, config: &WorkerConfig) -> Self {
        Self::new(
            options.sqlite3_wasm_path.clone(),
            config.builtin_asset_path.clone(),
        )
    }

    /// Where the default asset will be fetched from
    pub fn default_asset_location(&self) -> &str {
        self.wasm_path.as_deref().unwrap_or(&self.builtin_default)
    }
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new(None, BUILTIN_ASSET_PATH)
    }
}

impl ResourceResolver for AssetResolver {
    fn locate(&self, name: &str) -> String {
        if name == DEFAULT_ASSET_NAME {
            self.default_asset_location().to_string()
        } else {
            name.to_string()
        }
    }
}
